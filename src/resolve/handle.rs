//! Synchronization handles for operands.
//!
//! The engine only reads an operand's state while holding that operand's
//! handle. Plain values carry a no-op handle; values shared between threads
//! and mutated concurrently are wrapped in [`Shared`].

use super::types::{Comparable, Declared};
use std::any::TypeId;
use std::fmt;
use std::ops::Deref;
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

/// A value that exposes a synchronization handle.
///
/// `acquire` blocks until the handle is held and returns a guard through
/// which the declared value is read. The guard releases the handle on drop.
///
/// Every sized [`Comparable`] type is an operand with a no-op guard.
/// `dyn Comparable` is an operand for heterogeneous values known only at
/// runtime. [`Shared<T>`] provides a real mutual-exclusion handle.
pub trait Operand: Send + Sync + 'static {
    /// The declared type inspected once the handle is held.
    type Target: Declared + ?Sized;

    /// Guard holding the handle for as long as it lives.
    type Guard<'a>: Deref<Target = Self::Target>
    where
        Self: 'a;

    /// Acquires the handle, blocking if another thread holds it.
    fn acquire(&self) -> Self::Guard<'_>;

    /// Acquires the handle only if it is free right now.
    fn try_acquire(&self) -> Option<Self::Guard<'_>>;

    /// Runtime type of this instance, used for identity checks.
    fn instance_type(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

impl<T: Comparable> Operand for T {
    type Target = T;
    type Guard<'a> = &'a T;

    fn acquire(&self) -> Self::Guard<'_> {
        self
    }

    fn try_acquire(&self) -> Option<Self::Guard<'_>> {
        Some(self)
    }
}

impl Operand for dyn Comparable {
    type Target = dyn Comparable;
    type Guard<'a> = &'a (dyn Comparable + 'static);

    fn acquire(&self) -> Self::Guard<'_> {
        self
    }

    fn try_acquire(&self) -> Option<Self::Guard<'_>> {
        Some(self)
    }

    fn instance_type(&self) -> TypeId {
        self.as_any().type_id()
    }
}

/// A value guarded by its own mutex.
///
/// Writers mutate through [`lock`](Shared::lock) or
/// [`update`](Shared::update); the engine reads under the same mutex, so a
/// comparison never observes a half-written value.
///
/// A poisoned mutex is recovered: the engine never writes, and writers that
/// panicked leave whatever state they committed.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use u_compare::{compare, Shared};
///
/// let a = Shared::new(10);
/// let b = Shared::new(20);
/// assert_eq!(compare(Some(&a), Some(&b)), Ordering::Less);
///
/// a.update(|v| *v = 30);
/// assert_eq!(compare(Some(&a), Some(&b)), Ordering::Greater);
/// ```
#[derive(Default)]
pub struct Shared<T> {
    state: Mutex<T>,
}

impl<T> Shared<T> {
    /// Wraps `value` with a fresh handle.
    pub fn new(value: T) -> Self {
        Self {
            state: Mutex::new(value),
        }
    }

    /// Holds the handle and returns mutable access to the value.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `f` to the value while holding the handle.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.lock())
    }

    /// Consumes the wrapper and returns the value.
    pub fn into_inner(self) -> T {
        self.state.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Shared<T> {
    /// Clones the value under the handle.
    pub fn snapshot(&self) -> T {
        self.lock().clone()
    }
}

impl<T> From<T> for Shared<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared").field("state", &*self.lock()).finish()
    }
}

impl<T: Comparable> Operand for Shared<T> {
    type Target = T;
    type Guard<'a> = MutexGuard<'a, T>;

    fn acquire(&self) -> Self::Guard<'_> {
        self.lock()
    }

    fn try_acquire(&self) -> Option<Self::Guard<'_>> {
        match self.state.try_lock() {
            Ok(guard) => Some(guard),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_operand_guard_is_value() {
        let v = 5u32;
        assert_eq!(*v.acquire(), 5);
        assert_eq!(v.try_acquire().copied(), Some(5));
    }

    #[test]
    fn test_shared_try_acquire_blocked_while_locked() {
        let shared = Shared::new(1i64);
        let held = shared.lock();
        assert!(shared.try_acquire().is_none());
        drop(held);
        assert_eq!(shared.try_acquire().as_deref(), Some(&1));
    }

    #[test]
    fn test_shared_update_and_snapshot() {
        let shared = Shared::new(String::from("a"));
        shared.update(|s| s.push('b'));
        assert_eq!(shared.snapshot(), "ab");
        assert_eq!(shared.into_inner(), "ab");
    }

    #[test]
    fn test_shared_recovers_from_poison() {
        let shared = std::sync::Arc::new(Shared::new(3i32));
        let cloned = std::sync::Arc::clone(&shared);
        let _ = std::thread::spawn(move || {
            let _guard = cloned.lock();
            panic!("writer failed");
        })
        .join();
        assert_eq!(*shared.acquire(), 3);
        assert_eq!(shared.try_acquire().as_deref(), Some(&3));
    }

    #[test]
    fn test_instance_type_of_trait_object_is_runtime_type() {
        let value: &dyn Comparable = &8u16;
        assert_eq!(value.instance_type(), TypeId::of::<u16>());
        assert_eq!(8u16.instance_type(), TypeId::of::<u16>());
    }
}

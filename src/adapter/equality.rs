//! Equality and hashing adapter.

use super::downcast_operand;
use super::key::EqKey;
use crate::error::{Error, Result};
use crate::resolve::{self, acquire_pair, triage, Operand, Triage};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Equality and hash for values of one operand type.
///
/// Holds an optional predicate and an optional hash function. Each omitted
/// half falls back to the resolution engine ([`resolve::equals`] and
/// [`resolve::hash`]). Supplying a predicate without a matching hash
/// function breaks "equal values hash equal"; that is the caller's
/// responsibility and is not detected.
///
/// # Examples
///
/// ```
/// use u_compare::{hash_of, EqualityComparer};
///
/// let case_blind = EqualityComparer::<String>::from_parts(
///     Some(|a: &String, b: &String| a.eq_ignore_ascii_case(b)),
///     Some(|s: &String| hash_of(&s.to_lowercase())),
/// )
/// .unwrap();
///
/// let (a, b) = ("AB".to_string(), "ab".to_string());
/// assert!(case_blind.equals(&a, &b));
/// assert_eq!(case_blind.hash(&a), case_blind.hash(&b));
/// ```
pub struct EqualityComparer<T: Operand + ?Sized> {
    predicate: Option<Arc<dyn Fn(&T::Target, &T::Target) -> bool + Send + Sync>>,
    hasher: Option<Arc<dyn Fn(&T::Target) -> u64 + Send + Sync>>,
}

impl<T: Operand + ?Sized> EqualityComparer<T> {
    /// Creates a comparer that defers to the resolution engine for both
    /// equality and hashing.
    pub fn new() -> Self {
        Self {
            predicate: None,
            hasher: None,
        }
    }

    /// Creates a comparer with a custom predicate and the engine's hash.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `predicate` is `None`.
    pub fn from_predicate<P>(predicate: Option<P>) -> Result<Self>
    where
        P: Fn(&T::Target, &T::Target) -> bool + Send + Sync + 'static,
    {
        let predicate = predicate.ok_or_else(|| Error::missing("predicate"))?;
        debug!(
            operand = std::any::type_name::<T>(),
            "equality comparer uses a custom predicate with the default hash"
        );
        Ok(Self {
            predicate: Some(Arc::new(predicate)),
            hasher: None,
        })
    }

    /// Creates a comparer with a custom hash and the engine's equality.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `hasher` is `None`.
    pub fn from_hasher<H>(hasher: Option<H>) -> Result<Self>
    where
        H: Fn(&T::Target) -> u64 + Send + Sync + 'static,
    {
        let hasher = hasher.ok_or_else(|| Error::missing("hasher"))?;
        Ok(Self {
            predicate: None,
            hasher: Some(Arc::new(hasher)),
        })
    }

    /// Creates a comparer with both a custom predicate and a custom hash.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] naming the first half that is `None`.
    pub fn from_parts<P, H>(predicate: Option<P>, hasher: Option<H>) -> Result<Self>
    where
        P: Fn(&T::Target, &T::Target) -> bool + Send + Sync + 'static,
        H: Fn(&T::Target) -> u64 + Send + Sync + 'static,
    {
        let predicate = predicate.ok_or_else(|| Error::missing("predicate"))?;
        let hasher = hasher.ok_or_else(|| Error::missing("hasher"))?;
        Ok(Self {
            predicate: Some(Arc::new(predicate)),
            hasher: Some(Arc::new(hasher)),
        })
    }

    /// Returns `true` if `x` equals `y`.
    pub fn equals(&self, x: &T, y: &T) -> bool {
        self.equals_opt(Some(x), Some(y))
    }

    /// Equality of possibly absent values. Two absent values are equal.
    pub fn equals_opt(&self, x: Option<&T>, y: Option<&T>) -> bool {
        let Some(predicate) = &self.predicate else {
            return resolve::equals(x, y);
        };
        match triage(x, y) {
            Triage::Settled(verdict) => verdict.value == Ordering::Equal,
            Triage::Present(x, y) => {
                let (gx, gy) = acquire_pair(x, y);
                let xv: &T::Target = &gx;
                let yv: &T::Target = &gy;
                predicate(xv, yv)
            }
        }
    }

    /// Hash of `value`, consistent with [`equals`](Self::equals) when the
    /// halves were supplied consistently.
    pub fn hash(&self, value: &T) -> u64 {
        self.hash_opt(Some(value))
    }

    /// Hash of a possibly absent value. Absent values hash to 0.
    pub fn hash_opt(&self, value: Option<&T>) -> u64 {
        match (&self.hasher, value) {
            (_, None) => 0,
            (None, value) => resolve::hash(value),
            (Some(hasher), Some(value)) => {
                let guard = value.acquire();
                let target: &T::Target = &guard;
                hasher(target)
            }
        }
    }

    /// Wraps `value` so that hashed containers use this comparer.
    pub fn key(&self, value: T) -> EqKey<'_, T>
    where
        T: Sized,
    {
        EqKey::new(value, self)
    }

    /// Returns `true` if a custom predicate is bound.
    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    /// Returns `true` if a custom hash function is bound.
    pub fn has_hasher(&self) -> bool {
        self.hasher.is_some()
    }
}

impl<T: Operand + ?Sized> Default for EqualityComparer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Operand + ?Sized> Clone for EqualityComparer<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            hasher: self.hasher.clone(),
        }
    }
}

impl<T: Operand + ?Sized> fmt::Debug for EqualityComparer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EqualityComparer")
            .field("operand", &std::any::type_name::<T>())
            .field("predicate", &self.has_predicate())
            .field("hasher", &self.has_hasher())
            .finish()
    }
}

/// Object-safe equality and hashing over untyped values.
pub trait UntypedEqualityComparer: Send + Sync {
    /// Equality after casting both values to the bound type.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if a present value has a foreign type.
    fn equals_untyped(&self, x: Option<&dyn Any>, y: Option<&dyn Any>) -> Result<bool>;

    /// Hash after casting the value to the bound type.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if a present value has a foreign type.
    fn hash_untyped(&self, value: Option<&dyn Any>) -> Result<u64>;
}

impl<T: Operand> UntypedEqualityComparer for EqualityComparer<T> {
    fn equals_untyped(&self, x: Option<&dyn Any>, y: Option<&dyn Any>) -> Result<bool> {
        let x = downcast_operand::<T>(x)?;
        let y = downcast_operand::<T>(y)?;
        Ok(self.equals_opt(x, y))
    }

    fn hash_untyped(&self, value: Option<&dyn Any>) -> Result<u64> {
        let value = downcast_operand::<T>(value)?;
        Ok(self.hash_opt(value))
    }
}

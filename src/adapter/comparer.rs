//! Ordering adapter.

use super::downcast_operand;
use super::key::OrdKey;
use crate::error::{Error, Result};
use crate::resolve::{compare_with, Comparison, Operand};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Ordering for values of one operand type.
///
/// Built either with no strategy, in which case it forwards to the
/// resolution engine, or with one explicit strategy for `T`'s declared
/// type. Absent values sort first and identical instances compare `Equal`
/// in both modes; the strategy only sees present, distinct values read
/// under their handles.
///
/// # Examples
///
/// ```
/// use u_compare::Comparer;
///
/// let descending = Comparer::<i32>::with_strategy(|a, b| b.cmp(a));
/// let mut values = vec![3, 1, 2];
/// values.sort_by(descending.as_fn());
/// assert_eq!(values, vec![3, 2, 1]);
/// ```
pub struct Comparer<T: Operand + ?Sized> {
    strategy: Option<Arc<dyn Comparison<T::Target>>>,
}

impl<T: Operand + ?Sized> Comparer<T> {
    /// Creates a comparer that defers to the resolution engine.
    pub fn new() -> Self {
        Self { strategy: None }
    }

    /// Creates a comparer bound to `strategy`.
    pub fn with_strategy<F>(strategy: F) -> Self
    where
        F: Fn(&T::Target, &T::Target) -> Ordering + Send + Sync + 'static,
    {
        Self {
            strategy: Some(Arc::new(strategy)),
        }
    }

    /// Creates a comparer from an optional strategy.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `strategy` is `None`.
    pub fn from_strategy<F>(strategy: Option<F>) -> Result<Self>
    where
        F: Fn(&T::Target, &T::Target) -> Ordering + Send + Sync + 'static,
    {
        strategy
            .map(Self::with_strategy)
            .ok_or_else(|| Error::missing("strategy"))
    }

    /// Creates a comparer from a shared [`Comparison`] implementation.
    pub fn from_comparison(comparison: Arc<dyn Comparison<T::Target>>) -> Self {
        Self {
            strategy: Some(comparison),
        }
    }

    /// Returns `true` if an explicit strategy is bound.
    pub fn has_strategy(&self) -> bool {
        self.strategy.is_some()
    }

    /// Orders `x` relative to `y`.
    pub fn compare(&self, x: &T, y: &T) -> Ordering {
        self.compare_opt(Some(x), Some(y))
    }

    /// Orders possibly absent values; absent sorts first.
    pub fn compare_opt(&self, x: Option<&T>, y: Option<&T>) -> Ordering {
        compare_with(x, y, self.strategy.as_deref(), None)
    }

    /// Borrows this comparer as a closure for `sort_by` and friends.
    pub fn as_fn(&self) -> impl Fn(&T, &T) -> Ordering + '_ {
        move |x, y| self.compare(x, y)
    }

    /// Wraps `value` so that ordered containers use this comparer.
    pub fn key(&self, value: T) -> OrdKey<'_, T>
    where
        T: Sized,
    {
        OrdKey::new(value, self)
    }
}

impl<T: Operand + ?Sized> Default for Comparer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Operand + ?Sized> Clone for Comparer<T> {
    fn clone(&self) -> Self {
        Self {
            strategy: self.strategy.clone(),
        }
    }
}

impl<T: Operand + ?Sized> fmt::Debug for Comparer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparer")
            .field("operand", &std::any::type_name::<T>())
            .field("strategy", &self.has_strategy())
            .finish()
    }
}

/// Object-safe ordering over untyped values, for code that only handles
/// `dyn Any`.
pub trait UntypedComparer: Send + Sync {
    /// Orders `x` relative to `y` after casting both to the bound type.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if a present value has a foreign type.
    fn compare_untyped(&self, x: Option<&dyn Any>, y: Option<&dyn Any>) -> Result<Ordering>;
}

impl<T: Operand> UntypedComparer for Comparer<T> {
    fn compare_untyped(&self, x: Option<&dyn Any>, y: Option<&dyn Any>) -> Result<Ordering> {
        let x = downcast_operand::<T>(x)?;
        let y = downcast_operand::<T>(y)?;
        Ok(self.compare_opt(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Shared;

    #[test]
    fn test_default_comparer_uses_engine() {
        let comparer = Comparer::<i32>::new();
        assert!(!comparer.has_strategy());
        assert_eq!(comparer.compare(&1, &2), Ordering::Less);
        assert_eq!(comparer.compare_opt(None, Some(&2)), Ordering::Less);
        assert_eq!(comparer.compare_opt(None, None), Ordering::Equal);
    }

    #[test]
    fn test_descending_sort() {
        let comparer = Comparer::<i32>::with_strategy(|a, b| b.cmp(a));
        let mut values = vec![3, 1, 2];
        values.sort_by(comparer.as_fn());
        assert_eq!(values, vec![3, 2, 1]);
    }

    #[test]
    fn test_from_strategy_rejects_none() {
        let missing: Option<fn(&i32, &i32) -> Ordering> = None;
        let err = Comparer::<i32>::from_strategy(missing).unwrap_err();
        assert_eq!(err, Error::InvalidArgument { parameter: "strategy" });
    }

    #[test]
    fn test_from_strategy_accepts_some() {
        let comparer = Comparer::<u8>::from_strategy(Some(|a: &u8, b: &u8| b.cmp(a))).unwrap();
        assert_eq!(comparer.compare(&1, &2), Ordering::Greater);
    }

    #[test]
    fn test_from_comparison_shares_strategy() {
        let by_len: Arc<dyn Comparison<String>> =
            Arc::new(|a: &String, b: &String| a.len().cmp(&b.len()));
        let comparer = Comparer::<String>::from_comparison(by_len);
        let cloned = comparer.clone();
        assert_eq!(
            cloned.compare(&"ccc".to_string(), &"a".to_string()),
            Ordering::Greater
        );
    }

    #[test]
    fn test_shared_operands() {
        let comparer = Comparer::<Shared<i32>>::with_strategy(|a, b| b.cmp(a));
        let a = Shared::new(1);
        let b = Shared::new(2);
        assert_eq!(comparer.compare(&a, &b), Ordering::Greater);
        b.update(|v| *v = 0);
        assert_eq!(comparer.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_untyped() {
        let comparer = Comparer::<i32>::new();
        let (a, b): (i32, i32) = (4, 9);
        assert_eq!(
            comparer.compare_untyped(Some(&a), Some(&b)),
            Ok(Ordering::Less)
        );
        assert_eq!(comparer.compare_untyped(Some(&a), None), Ok(Ordering::Greater));
        assert_eq!(
            comparer.compare_untyped(Some(&a), Some(&"nine")),
            Err(Error::mismatch::<i32>())
        );
    }

    #[test]
    fn test_untyped_trait_object() {
        let comparer: Box<dyn UntypedComparer> = Box::new(Comparer::<u64>::new());
        let (a, b) = (7u64, 7u64);
        assert_eq!(comparer.compare_untyped(Some(&a), Some(&b)), Ok(Ordering::Equal));
    }
}

//! Container keys that carry their adapter.

use super::{Comparer, EqualityComparer};
use crate::resolve::Operand;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A value ordered by a [`Comparer`], usable in `BTreeMap`, `BTreeSet`
/// and `BinaryHeap`.
///
/// Only keys built from the same comparer should be mixed in one
/// container. The engine's weak fallback makes values of unrelated types
/// compare `Equal`, so a set keyed this way may merge them.
pub struct OrdKey<'c, T: Operand> {
    value: T,
    comparer: &'c Comparer<T>,
}

impl<'c, T: Operand> OrdKey<'c, T> {
    pub(crate) fn new(value: T, comparer: &'c Comparer<T>) -> Self {
        Self { value, comparer }
    }

    /// Returns the wrapped value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Unwraps the value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Operand> PartialEq for OrdKey<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Operand> Eq for OrdKey<'_, T> {}

impl<T: Operand> PartialOrd for OrdKey<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Operand> Ord for OrdKey<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparer.compare(&self.value, &other.value)
    }
}

impl<T: Operand + fmt::Debug> fmt::Debug for OrdKey<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OrdKey").field(&self.value).finish()
    }
}

/// A value hashed and compared by an [`EqualityComparer`], usable in
/// `HashMap` and `HashSet`.
pub struct EqKey<'c, T: Operand> {
    value: T,
    comparer: &'c EqualityComparer<T>,
}

impl<'c, T: Operand> EqKey<'c, T> {
    pub(crate) fn new(value: T, comparer: &'c EqualityComparer<T>) -> Self {
        Self { value, comparer }
    }

    /// Returns the wrapped value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Unwraps the value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Operand> PartialEq for EqKey<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.comparer.equals(&self.value, &other.value)
    }
}

impl<T: Operand> Eq for EqKey<'_, T> {}

impl<T: Operand> Hash for EqKey<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.comparer.hash(&self.value));
    }
}

impl<T: Operand + fmt::Debug> fmt::Debug for EqKey<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EqKey").field(&self.value).finish()
    }
}

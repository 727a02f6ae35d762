//! Multi-key sorting and de-duplication.

use super::config::{SortConfig, TieBreaker};
use crate::adapter::{Comparer, EqualityComparer};
use crate::error::Result;
use crate::resolve::{self, Operand};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sorts collections by an ordered list of [`Comparer`] keys.
///
/// Keys are applied sequentially: the second key only breaks ties of the
/// first, and so on. Items every key ranks `Equal` are ordered by the
/// configured [`TieBreaker`]. An engine without keys orders by the
/// resolution engine's defaults.
///
/// # Examples
///
/// ```
/// use u_compare::bulk::SortEngine;
/// use u_compare::Comparer;
///
/// let words = ["pear", "fig", "apple", "kiwi"];
/// let engine = SortEngine::new()
///     .with_key(Comparer::<&str>::with_strategy(|a, b| a.len().cmp(&b.len())))
///     .with_key(Comparer::new());
///
/// let sorted: Vec<_> = engine.sort(&words).into_iter().copied().collect();
/// assert_eq!(sorted, vec!["fig", "kiwi", "pear", "apple"]);
/// ```
pub struct SortEngine<T: Operand> {
    keys: Vec<Comparer<T>>,
    config: SortConfig,
}

impl<T: Operand> SortEngine<T> {
    /// Creates an engine with no keys and the default configuration.
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            config: SortConfig::default(),
        }
    }

    /// Appends a key. Earlier keys take precedence.
    pub fn with_key(mut self, key: Comparer<T>) -> Self {
        self.keys.push(key);
        self
    }

    /// Replaces the configuration after validating it.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the
    /// configuration does not validate.
    pub fn with_config(mut self, config: SortConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Returns the number of keys.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Orders `x` relative to `y` by the keys alone, without tie-breaking.
    pub fn compare(&self, x: &T, y: &T) -> Ordering {
        self.compare_opt(Some(x), Some(y))
    }

    /// Orders possibly absent values by the keys; absent sorts first.
    pub fn compare_opt(&self, x: Option<&T>, y: Option<&T>) -> Ordering {
        if self.keys.is_empty() {
            return resolve::compare(x, y);
        }
        self.keys
            .iter()
            .map(|key| key.compare_opt(x, y))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Sorts items and returns indices into the original slice.
    pub fn sort_indices(&self, items: &[T]) -> Vec<usize> {
        self.order_indices(items.len(), |a, b| self.compare(&items[a], &items[b]))
    }

    /// Sorts items and returns references in sorted order.
    pub fn sort<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        self.sort_indices(items)
            .into_iter()
            .map(|i| &items[i])
            .collect()
    }

    /// Sorts possibly absent items; absent items come first.
    pub fn sort_optional_indices(&self, items: &[Option<T>]) -> Vec<usize> {
        self.order_indices(items.len(), |a, b| {
            self.compare_opt(items[a].as_ref(), items[b].as_ref())
        })
    }

    /// Returns the index of the first item in sorted order.
    ///
    /// Returns `None` if the slice is empty.
    pub fn select_best(&self, items: &[T]) -> Option<usize> {
        (0..items.len()).min_by(|&a, &b| self.ranked(self.compare(&items[a], &items[b]), a, b))
    }

    fn ranked(&self, ord: Ordering, a: usize, b: usize) -> Ordering {
        ord.then_with(|| match self.config.tie_breaker {
            TieBreaker::PreserveOrder => a.cmp(&b),
            TieBreaker::ReverseOrder => b.cmp(&a),
        })
    }

    fn order_indices<F>(&self, len: usize, compare: F) -> Vec<usize>
    where
        F: Fn(usize, usize) -> Ordering + Sync,
    {
        let mut indices: Vec<usize> = (0..len).collect();
        self.sort_in_place(&mut indices, |a, b| self.ranked(compare(*a, *b), *a, *b));
        indices
    }

    #[cfg(feature = "parallel")]
    fn sort_in_place<F>(&self, indices: &mut [usize], by: F)
    where
        F: Fn(&usize, &usize) -> Ordering + Sync,
    {
        if self.config.parallel && indices.len() >= self.config.parallel_threshold {
            debug!(len = indices.len(), "sorting indices in parallel");
            indices.par_sort_by(by);
        } else {
            indices.sort_by(by);
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn sort_in_place<F>(&self, indices: &mut [usize], by: F)
    where
        F: Fn(&usize, &usize) -> Ordering + Sync,
    {
        indices.sort_by(by);
    }
}

impl<T: Operand> Default for SortEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Indices of the first occurrence of each distinct item, in input order.
///
/// Items are bucketed by `comparer.hash` and compared with
/// `comparer.equals` inside a bucket, so the comparer's halves must agree.
pub fn distinct_indices<T: Operand>(items: &[T], comparer: &EqualityComparer<T>) -> Vec<usize> {
    let mut buckets: HashMap<u64, Vec<usize>> = HashMap::new();
    let mut kept = Vec::new();

    for (i, item) in items.iter().enumerate() {
        let bucket = buckets.entry(comparer.hash(item)).or_default();
        if bucket.iter().any(|&j| comparer.equals(&items[j], item)) {
            continue;
        }
        bucket.push(i);
        kept.push(i);
    }

    debug!(
        total = items.len(),
        distinct = kept.len(),
        "de-duplicated items"
    );
    kept
}

/// References to the first occurrence of each distinct item, in input order.
pub fn distinct<'a, T: Operand>(items: &'a [T], comparer: &EqualityComparer<T>) -> Vec<&'a T> {
    distinct_indices(items, comparer)
        .into_iter()
        .map(|i| &items[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{hash_of, Shared};

    #[derive(Debug, Clone, PartialEq)]
    struct Job {
        priority: u8,
        name: &'static str,
    }

    impl crate::Comparable for Job {}

    fn jobs() -> Vec<Job> {
        vec![
            Job { priority: 2, name: "build" },
            Job { priority: 1, name: "lint" },
            Job { priority: 2, name: "audit" },
            Job { priority: 1, name: "fmt" },
        ]
    }

    fn by_priority() -> Comparer<Job> {
        Comparer::with_strategy(|a: &Job, b: &Job| a.priority.cmp(&b.priority))
    }

    fn by_name() -> Comparer<Job> {
        Comparer::with_strategy(|a: &Job, b: &Job| a.name.cmp(b.name))
    }

    #[test]
    fn test_single_key_is_stable() {
        let engine = SortEngine::new().with_key(by_priority());
        let items = jobs();
        assert_eq!(engine.sort_indices(&items), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_second_key_breaks_ties() {
        let engine = SortEngine::new().with_key(by_priority()).with_key(by_name());
        let items = jobs();
        let names: Vec<&str> = engine.sort(&items).iter().map(|j| j.name).collect();
        assert_eq!(names, vec!["fmt", "lint", "audit", "build"]);
        assert_eq!(engine.key_count(), 2);
    }

    #[test]
    fn test_reverse_tie_breaker() {
        let config = SortConfig::default().with_tie_breaker(TieBreaker::ReverseOrder);
        let engine = SortEngine::new()
            .with_key(by_priority())
            .with_config(config)
            .unwrap();
        let items = jobs();
        assert_eq!(engine.sort_indices(&items), vec![3, 1, 2, 0]);
        assert_eq!(engine.select_best(&items), Some(3));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SortConfig::default().with_parallel_threshold(0);
        assert!(SortEngine::<Job>::new().with_config(config).is_err());
    }

    #[test]
    fn test_no_keys_uses_engine_defaults() {
        let engine = SortEngine::<i32>::new();
        let items = vec![3, -1, 2];
        assert_eq!(engine.sort_indices(&items), vec![1, 2, 0]);
    }

    #[test]
    fn test_select_best() {
        let engine = SortEngine::new().with_key(by_priority());
        let items = jobs();
        assert_eq!(engine.select_best(&items), Some(1));
        assert_eq!(engine.select_best(&[]), None);
    }

    #[test]
    fn test_optional_items_sort_absent_first() {
        let engine = SortEngine::<i32>::new();
        let items = vec![Some(5), None, Some(1), None];
        assert_eq!(engine.sort_optional_indices(&items), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_shared_items() {
        let engine = SortEngine::<Shared<i32>>::new();
        let items = vec![Shared::new(9), Shared::new(4), Shared::new(6)];
        items[1].update(|v| *v = 10);
        assert_eq!(engine.sort_indices(&items), vec![2, 0, 1]);
    }

    #[test]
    fn test_distinct_case_insensitive() {
        let comparer = EqualityComparer::<String>::from_parts(
            Some(|a: &String, b: &String| a.eq_ignore_ascii_case(b)),
            Some(|s: &String| hash_of(&s.to_lowercase())),
        )
        .unwrap();
        let items: Vec<String> = ["Rust", "go", "RUST", "Go", "zig"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(distinct_indices(&items, &comparer), vec![0, 1, 4]);
        let kept: Vec<&str> = distinct(&items, &comparer)
            .into_iter()
            .map(String::as_str)
            .collect();
        assert_eq!(kept, vec!["Rust", "go", "zig"]);
    }

    #[test]
    fn test_distinct_default_comparer() {
        let items = vec![1u8, 2, 1, 3, 2];
        assert_eq!(
            distinct_indices(&items, &EqualityComparer::new()),
            vec![0, 1, 3]
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let items: Vec<i64> = (0..5000).map(|i| (i * 7919) % 1000).collect();
        let sequential = SortEngine::<i64>::new();
        let parallel = SortEngine::<i64>::new()
            .with_config(
                SortConfig::default()
                    .with_parallel(true)
                    .with_parallel_threshold(100),
            )
            .unwrap();
        assert_eq!(parallel.sort_indices(&items), sequential.sort_indices(&items));
    }
}

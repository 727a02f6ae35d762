//! Sort configuration.

use crate::error::{Error, Result};

/// Order of items that every key ranks `Equal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreaker {
    /// Keep the original relative order (stable).
    #[default]
    PreserveOrder,

    /// Reverse the original relative order (later items first).
    ReverseOrder,
}

/// Configuration for [`SortEngine`](super::SortEngine).
///
/// # Examples
///
/// ```
/// use u_compare::bulk::{SortConfig, TieBreaker};
///
/// let config = SortConfig::default()
///     .with_tie_breaker(TieBreaker::ReverseOrder)
///     .with_parallel(true)
///     .with_parallel_threshold(10_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortConfig {
    /// How ties across all keys are ordered.
    pub tie_breaker: TieBreaker,

    /// Whether to sort on rayon when the `parallel` feature is enabled.
    ///
    /// Ignored without the feature.
    pub parallel: bool,

    /// Minimum number of items before the parallel path is taken.
    pub parallel_threshold: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            tie_breaker: TieBreaker::default(),
            parallel: false,
            parallel_threshold: 4096,
        }
    }
}

impl SortConfig {
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_parallel_threshold(mut self, n: usize) -> Self {
        self.parallel_threshold = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.parallel_threshold == 0 {
            return Err(Error::InvalidConfig(
                "parallel_threshold must be positive".into(),
            ));
        }
        Ok(())
    }
}

//! Error types for adapter construction and bulk configuration.
//!
//! The resolution cascade itself never fails: operands that cannot be
//! ordered resolve to `Equal`. Errors only surface at the boundaries where
//! callers hand over strategies, untyped values or configuration.

use thiserror::Error;

/// Result type for fallible u-compare operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at construction and configuration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required constructor parameter was supplied as `None`.
    #[error("invalid argument: `{parameter}` must be supplied")]
    InvalidArgument {
        /// Name of the missing parameter.
        parameter: &'static str,
    },

    /// An untyped entry point received a value of a foreign type.
    #[error("type mismatch: expected a value of type `{expected}`")]
    TypeMismatch {
        /// Name of the type the adapter is bound to.
        expected: &'static str,
    },

    /// Bulk configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn missing(parameter: &'static str) -> Self {
        Error::InvalidArgument { parameter }
    }

    pub(crate) fn mismatch<T: ?Sized>() -> Self {
        Error::TypeMismatch {
            expected: std::any::type_name::<T>(),
        }
    }
}

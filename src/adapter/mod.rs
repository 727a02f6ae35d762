//! Adapters from strategies to container-facing comparers.
//!
//! - [`Comparer`]: ordering for sorting and ordered containers.
//! - [`EqualityComparer`]: equality plus hash for keyed lookup.
//!
//! Both default to the resolution engine when no strategy is supplied, are
//! immutable once built, and can be shared across threads and containers.
//! [`OrdKey`] and [`EqKey`] carry a value together with its adapter so that
//! standard `BTreeMap`/`HashMap` style containers use the adapter's rules.
//! Legacy code that only handles `dyn Any` values goes through
//! [`UntypedComparer`] and [`UntypedEqualityComparer`].

mod comparer;
mod equality;
mod key;

pub use comparer::{Comparer, UntypedComparer};
pub use equality::{EqualityComparer, UntypedEqualityComparer};
pub use key::{EqKey, OrdKey};

use crate::error::{Error, Result};
use std::any::Any;

/// Casts an untyped operand to `T`, keeping absence.
fn downcast_operand<T: Any>(value: Option<&dyn Any>) -> Result<Option<&T>> {
    value
        .map(|v| v.downcast_ref::<T>().ok_or_else(Error::mismatch::<T>))
        .transpose()
}

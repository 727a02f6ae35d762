//! Resolution engine.
//!
//! Stateless `compare`, `equals` and `hash` over operands whose declared
//! types may differ or be known only at runtime. Each call applies a fixed
//! cascade:
//!
//! - **Absence and identity**: settled without touching any handle.
//! - **Explicit strategies**: caller intent, bound per declared type.
//! - **Native capabilities**: what the operand types declare through
//!   [`Comparable`], typed before untyped.
//! - **Default behavior** of the declared type, then a weak fallback.
//!
//! Operands are read only while their synchronization handle is held
//! (see [`Operand`] and [`Shared`]).

mod engine;
mod handle;
mod primitives;
mod types;

pub use engine::{
    compare, compare_with, equals, equals_with, hash, resolve_compare, resolve_equals, Rule,
    Verdict,
};
pub use handle::{Operand, Shared};
pub use types::{
    hash_of, ordering_from_sign, AsAny, Comparable, Comparison, Declared, EqualityStrategy,
    Equivalence,
};

pub(crate) use engine::{acquire_pair, triage, Triage};

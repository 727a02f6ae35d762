//! Domain-agnostic cross-type comparison and equality resolution.
//!
//! Decides orderings and equality for operands whose declared types may
//! differ or be known only at runtime:
//!
//! - **Resolution engine** ([`resolve`]): stateless [`compare`], [`equals`]
//!   and [`hash`], applying a fixed precedence of explicit strategies,
//!   native capabilities and default behavior. Operands are read only while
//!   their synchronization handle is held.
//! - **Adapters** ([`adapter`]): [`Comparer`] and [`EqualityComparer`] bind a
//!   strategy (or the engine defaults) to the shapes sorting and keyed
//!   containers expect.
//! - **Bulk operations** ([`bulk`]): multi-key sorting, best-item selection
//!   and de-duplication over slices.
//!
//! # Architecture
//!
//! This crate sits at Layer 2 (Algorithms) in the U-Engine ecosystem and
//! carries no global state. Domain types opt in by implementing
//! [`Comparable`] (or through the [`comparable!`] macro); values mutated
//! concurrently are wrapped in [`Shared`].
//!
//! # Examples
//!
//! ```
//! use std::cmp::Ordering;
//! use u_compare::{compare, Comparer, EqualityComparer, hash_of};
//!
//! assert_eq!(compare(Some(&5), Some(&5)), Ordering::Equal);
//! assert_eq!(compare(None::<&i32>, Some(&3)), Ordering::Less);
//!
//! let descending = Comparer::<i32>::with_strategy(|a, b| b.cmp(a));
//! let mut values = vec![3, 1, 2];
//! values.sort_by(descending.as_fn());
//! assert_eq!(values, vec![3, 2, 1]);
//!
//! let case_blind = EqualityComparer::<String>::from_parts(
//!     Some(|a: &String, b: &String| a.eq_ignore_ascii_case(b)),
//!     Some(|s: &String| hash_of(&s.to_lowercase())),
//! )
//! .unwrap();
//! let (a, b) = ("AB".to_string(), "ab".to_string());
//! assert!(case_blind.equals(&a, &b));
//! assert_eq!(case_blind.hash(&a), case_blind.hash(&b));
//! ```

pub mod adapter;
pub mod bulk;
mod error;
pub mod resolve;

pub use adapter::{Comparer, EqKey, EqualityComparer, OrdKey, UntypedComparer, UntypedEqualityComparer};
pub use error::{Error, Result};
pub use resolve::{
    compare, compare_with, equals, equals_with, hash, hash_of, ordering_from_sign,
    resolve_compare, resolve_equals, AsAny, Comparable, Comparison, Declared, EqualityStrategy,
    Equivalence, Operand, Rule, Shared, Verdict,
};

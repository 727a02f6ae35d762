//! Bulk operations over slices.
//!
//! Ranks and de-duplicates whole collections through the adapters:
//!
//! - **Multi-key sorting**: [`SortEngine`] applies [`Comparer`](crate::Comparer)
//!   keys in order; a later key is only consulted when every earlier key
//!   reports `Equal`.
//! - **De-duplication**: [`distinct`] keeps the first occurrence of each
//!   equivalence class under an [`EqualityComparer`](crate::EqualityComparer).
//!
//! With the `parallel` feature, large index sorts can run on rayon.

mod config;
mod engine;

pub use config::{SortConfig, TieBreaker};
pub use engine::{distinct, distinct_indices, SortEngine};

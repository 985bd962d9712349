//! Domain Layer
//!
//! Pure, synchronous flag interpretation with no I/O and no shared state.
//!
//! - [`shared`]: severity taxonomy, flag record, ordering, coercion, formatting
//! - [`rules`]: one rule set per analysis domain (`snapshot → ordered flags`)
//! - [`rebalance`]: rebalance trade result and its agent/API projections

pub mod rebalance;
pub mod rules;
pub mod shared;

//! Rebalance Result
//!
//! The externally computed rebalance trade result and its two projections:
//!
//! - [`RebalanceResult::get_agent_snapshot`]: flat record consumed by
//!   [`generate_rebalance_flags`](crate::domain::rules::generate_rebalance_flags)
//! - [`RebalanceResult::to_api_response`]: richer payload for the HTTP layer
//!
//! Both are JSON-safe: every numeric value passes through [`sanitize`].

mod leg;
mod projection;
mod result;
pub mod sanitize;

pub use leg::{SkippedTrade, TradeLeg, TradeSide};
pub use projection::SUMMARY_NUMERIC_FIELDS;
pub use result::{
    RebalanceResult, RebalanceResultBuilder, RebalanceStatus, SummaryValue, UnmanagedHandling,
};

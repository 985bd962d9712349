//! Domain Rule Sets
//!
//! Each rule set is a total function from a snapshot to a severity-ordered
//! list of flags. Rule sets never call each other and never mutate their
//! input. The common shape:
//!
//! 1. Failure-first: a non-success `status` yields a single `error` flag.
//! 2. Independent threshold rules append flags cumulatively; mutually
//!    exclusive branches are ordered [`Branch`] chains (first match wins).
//! 3. Optional neutral fallback so a successful evaluation is never empty.
//! 4. Severity sort.

pub mod exit_signal;
pub mod factor;
pub mod futures_curve;
pub mod greeks;
pub mod income;
pub mod leverage;
pub mod rebalance;
pub mod risk_score;
pub mod tax_harvest;

pub use exit_signal::generate_exit_signal_flags;
pub use factor::generate_factor_flags;
pub use futures_curve::generate_futures_curve_flags;
pub use greeks::generate_greeks_flags;
pub use income::generate_income_flags;
pub use leverage::generate_leverage_flags;
pub use rebalance::generate_rebalance_flags;
pub use risk_score::generate_risk_flags;
pub use tax_harvest::generate_tax_harvest_flags;

use super::shared::{Flag, Record};

/// Status value marking a successful upstream analysis.
pub const SUCCESS_STATUS: &str = "success";

/// One arm of a mutually exclusive branch chain.
pub struct Branch<S> {
    /// Predicate selecting this arm.
    pub when: fn(&S) -> bool,
    /// Flag produced when the arm is selected.
    pub then: fn(&S) -> Flag,
}

/// Evaluate branches in order and build the flag of the first match.
pub fn first_match<S>(snapshot: &S, branches: &[Branch<S>]) -> Option<Flag> {
    branches
        .iter()
        .find(|branch| (branch.when)(snapshot))
        .map(|branch| (branch.then)(snapshot))
}

/// Failure flag for a snapshot whose `status` is present and not
/// [`SUCCESS_STATUS`].
///
/// The upstream `error` (or `message`) text is carried verbatim when
/// available, else `fallback`.
pub(crate) fn status_failure(record: &Record<'_>, kind: &str, fallback: &str) -> Option<Flag> {
    let status = record.get("status")?;
    if status.as_str() == Some(SUCCESS_STATUS) {
        return None;
    }
    let message = record
        .opt_str("error")
        .or_else(|| record.opt_str("message"))
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback);
    Some(Flag::error(kind, message))
}

//! Rebalance result rule set.
//!
//! Consumes the record produced by
//! [`RebalanceResult::get_agent_snapshot`](crate::domain::rebalance::RebalanceResult::get_agent_snapshot).

use serde_json::Value;

use super::status_failure;
use crate::domain::shared::{Flag, Record, format, sort_flags};

/// Turnover, in percent, at which the trade plan is called out.
pub const HIGH_TURNOVER_PCT: f64 = 25.0;
/// Failed tickers named before the overflow suffix.
pub const FAILED_TICKERS_SHOWN: usize = 3;

/// Decoded rebalance agent snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RebalanceSnapshot {
    /// Legs in the plan.
    pub trade_count: i64,
    /// Sell legs.
    pub sell_count: i64,
    /// Buy legs.
    pub buy_count: i64,
    /// Trades the rebalancer declined.
    pub skipped_count: i64,
    /// Free-text warnings attached to the result.
    pub warning_count: i64,
    /// Tickers of legs reporting a failure.
    pub failed_tickers: Vec<String>,
    /// Cash left after settlement.
    pub residual_cash: f64,
    /// Turnover, in percent of portfolio value.
    pub turnover_pct: f64,
    /// Unmanaged-position handling mode.
    pub unmanaged_handling: String,
    /// Tickers held outside the target model.
    pub unmanaged_positions: Vec<String>,
}

impl RebalanceSnapshot {
    /// Decode from a snapshot record.
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            trade_count: record.count("trade_count"),
            sell_count: record.count("sell_count"),
            buy_count: record.count("buy_count"),
            skipped_count: record.count("skipped_count"),
            warning_count: record.count("warning_count"),
            failed_tickers: record
                .records("trades")
                .filter(|leg| matches!(leg.opt_str("status"), Some("error" | "failed")))
                .map(|leg| leg.str_or("ticker", "unknown").to_string())
                .collect(),
            residual_cash: record.f64_or("residual_cash", 0.0),
            turnover_pct: record.f64_or("turnover_pct", 0.0),
            unmanaged_handling: record.str_or("unmanaged_handling", "ignore").to_string(),
            unmanaged_positions: record
                .list("unmanaged_positions")
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Generate rebalance flags.
#[must_use]
pub fn generate_rebalance_flags(snapshot: &Value) -> Vec<Flag> {
    let record = Record::from_value_or_empty(snapshot);
    if let Some(failure) = status_failure(&record, "rebalance_failed", "Rebalance failed") {
        return vec![failure];
    }
    let plan = RebalanceSnapshot::from_record(&record);

    if plan.trade_count == 0 {
        return vec![Flag::success(
            "portfolio_balanced",
            "Portfolio is within target weights; no trades needed",
        )];
    }

    let mut flags = Vec::new();

    if !plan.failed_tickers.is_empty() {
        let failed = plan.failed_tickers.len();
        flags.push(
            Flag::warning(
                "failed_trades",
                format!(
                    "{} could not be constructed: {}",
                    format::counted(failed as i64, "trade"),
                    format::names_with_overflow(&plan.failed_tickers, FAILED_TICKERS_SHOWN, failed)
                ),
            )
            .with_metric("failed_count", failed as f64),
        );
    }

    if plan.residual_cash < 0.0 {
        flags.push(
            Flag::warning(
                "cash_shortfall",
                format!(
                    "Trades overdraw available cash by {}",
                    format::currency(plan.residual_cash.abs())
                ),
            )
            .with_metric("residual_cash", plan.residual_cash),
        );
    }

    if plan.turnover_pct >= HIGH_TURNOVER_PCT {
        flags.push(
            Flag::info(
                "high_turnover",
                format!(
                    "Rebalance turns over {} of the portfolio",
                    format::pct(plan.turnover_pct)
                ),
            )
            .with_metric("turnover_pct", plan.turnover_pct),
        );
    }

    if plan.skipped_count > 0 {
        flags.push(Flag::info(
            "trades_skipped",
            format!(
                "{} skipped (below minimum size or restricted)",
                format::counted(plan.skipped_count, "trade")
            ),
        ));
    }

    if !plan.unmanaged_positions.is_empty() {
        flags.push(Flag::info(
            "unmanaged_positions",
            format!(
                "{} outside the target model ({}): {}",
                format::counted(plan.unmanaged_positions.len() as i64, "position"),
                plan.unmanaged_handling,
                format::names_with_overflow(
                    &plan.unmanaged_positions,
                    FAILED_TICKERS_SHOWN,
                    plan.unmanaged_positions.len()
                )
            ),
        ));
    }

    if plan.warning_count > 0 {
        flags.push(Flag::warning(
            "rebalance_warnings",
            format!(
                "Rebalance produced {}",
                format::counted(plan.warning_count, "warning")
            ),
        ));
    }

    if flags.is_empty() {
        flags.push(Flag::success(
            "rebalance_ready",
            format!(
                "{} ready: {} and {}",
                format::counted(plan.trade_count, "trade"),
                format::counted(plan.sell_count, "sell"),
                format::counted(plan.buy_count, "buy")
            ),
        ));
    }

    sort_flags(flags)
}

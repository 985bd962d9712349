//! Option portfolio Greeks rule set.
//!
//! Greeks flags are advisory only: malformed input yields no flags rather
//! than an error, every numeric field is coerced to a finite float, and the
//! result is ordered with [`SeverityOrder::Advisory`].

use serde_json::Value;

use super::status_failure;
use crate::domain::shared::{Flag, Record, SeverityOrder, format, sort_by_severity};

/// Daily theta below which time decay is flagged.
pub const THETA_DRAIN_THRESHOLD: f64 = -50.0;
/// Net delta above this share of portfolio value is flagged.
pub const DELTA_VALUE_RATIO: f64 = 0.20;
/// Net vega above this share of portfolio value is flagged.
pub const VEGA_VALUE_RATIO: f64 = 0.05;

/// Decoded option portfolio snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GreeksSnapshot {
    /// Total option portfolio value.
    pub total_value: f64,
    /// Net delta.
    pub total_delta: f64,
    /// Net daily theta.
    pub total_theta: f64,
    /// Net vega.
    pub total_vega: f64,
    /// Positions whose Greeks could not be computed.
    pub failed_count: i64,
}

impl GreeksSnapshot {
    /// Decode a snapshot; `None` when the snapshot or its `portfolio_greeks`
    /// entry is not a mapping.
    #[must_use]
    pub fn from_value(snapshot: &Value) -> Option<Self> {
        let record = Record::from_value(snapshot)?;
        let greeks = match record.get("portfolio_greeks") {
            Some(nested) => Record::from_value(nested)?,
            None => Record::empty(),
        };
        Some(Self {
            total_value: record.f64_or("total_value", 0.0),
            total_delta: greeks.f64_or("total_delta", 0.0),
            total_theta: greeks.f64_or("total_theta", 0.0),
            total_vega: greeks.f64_or("total_vega", 0.0),
            failed_count: greeks.count("failed_count"),
        })
    }
}

/// Generate option portfolio Greeks flags.
#[must_use]
pub fn generate_greeks_flags(snapshot: &Value) -> Vec<Flag> {
    if let Some(record) = Record::from_value(snapshot) {
        if let Some(failure) = status_failure(
            &record,
            "greeks_failed",
            "Greeks aggregation failed",
        ) {
            return vec![failure];
        }
    }
    let Some(greeks) = GreeksSnapshot::from_value(snapshot) else {
        return Vec::new();
    };
    let mut flags = Vec::new();
    let value = greeks.total_value;

    if greeks.total_theta < THETA_DRAIN_THRESHOLD {
        flags.push(
            Flag::warning(
                "theta_drain",
                format!(
                    "Portfolio loses {}/day to time decay",
                    format::currency(greeks.total_theta.abs())
                ),
            )
            .with_metric("total_theta", greeks.total_theta),
        );
    }

    if value > 0.0 && greeks.total_delta.abs() > DELTA_VALUE_RATIO * value.abs() {
        let ratio = greeks.total_delta.abs() / value.abs();
        flags.push(
            Flag::info(
                "high_delta_exposure",
                format!(
                    "Net delta of {:.1} is {} of portfolio value",
                    greeks.total_delta,
                    format::ratio_pct(ratio)
                ),
            )
            .with_metric("delta_ratio", ratio),
        );
    }

    if value > 0.0 && greeks.total_vega.abs() > VEGA_VALUE_RATIO * value {
        let ratio = greeks.total_vega.abs() / value;
        flags.push(
            Flag::warning(
                "high_vega_exposure",
                format!(
                    "Net vega of {:.1} is {} of portfolio value",
                    greeks.total_vega,
                    format::ratio_pct(ratio)
                ),
            )
            .with_metric("vega_ratio", ratio),
        );
    }

    if greeks.failed_count > 0 {
        flags.push(Flag::info(
            "greeks_unavailable",
            format!(
                "Greeks could not be computed for {}",
                format::counted(greeks.failed_count, "position")
            ),
        ));
    }

    sort_by_severity(flags, SeverityOrder::Advisory)
}

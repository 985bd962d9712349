//! Rebalance result aggregate and builder.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::leg::{SkippedTrade, TradeLeg, TradeSide};
use super::sanitize::finite_or_null;

/// Overall outcome of a rebalance computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebalanceStatus {
    /// All legs constructed.
    #[default]
    Success,
    /// Some legs failed.
    Partial,
    /// The rebalance could not be computed.
    Error,
    /// Portfolio already within tolerance.
    NoAction,
}

impl RebalanceStatus {
    /// Wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Error => "error",
            Self::NoAction => "no_action",
        }
    }

    /// Status as seen by the flag rule set.
    ///
    /// Only `error` is a failure there; partial results are still
    /// interpreted leg by leg.
    #[must_use]
    pub const fn agent_status(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success | Self::Partial | Self::NoAction => "success",
        }
    }
}

impl fmt::Display for RebalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A summary entry: numeric or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryValue {
    /// Numeric metric.
    Number(f64),
    /// Free-form text.
    Text(String),
}

impl From<f64> for SummaryValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SummaryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SummaryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// How positions outside the target model are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmanagedHandling {
    /// Leave them out of the weight math.
    #[default]
    Ignore,
    /// Keep them and rebalance around them.
    Hold,
    /// Sell them down to zero.
    Liquidate,
}

impl UnmanagedHandling {
    /// Wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Hold => "hold",
            Self::Liquidate => "liquidate",
        }
    }
}

/// Result of an externally computed rebalance.
///
/// Immutable once built; construct through [`RebalanceResult::builder`] or
/// deserialize from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceResult {
    #[serde(default)]
    status: RebalanceStatus,
    #[serde(default)]
    legs: Vec<TradeLeg>,
    #[serde(default)]
    summary: BTreeMap<String, SummaryValue>,
    #[serde(default)]
    skipped_trades: Vec<SkippedTrade>,
    #[serde(default)]
    warnings: Vec<String>,
    #[serde(default, serialize_with = "finite_or_null")]
    residual_cash: f64,
    #[serde(default)]
    unmanaged_handling: UnmanagedHandling,
    #[serde(default)]
    unmanaged_positions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl RebalanceResult {
    /// Start building a result.
    #[must_use]
    pub fn builder() -> RebalanceResultBuilder {
        RebalanceResultBuilder::default()
    }

    /// Overall status.
    #[must_use]
    pub const fn status(&self) -> RebalanceStatus {
        self.status
    }

    /// Trade legs in construction order.
    #[must_use]
    pub fn legs(&self) -> &[TradeLeg] {
        &self.legs
    }

    /// Summary metrics.
    #[must_use]
    pub const fn summary(&self) -> &BTreeMap<String, SummaryValue> {
        &self.summary
    }

    /// Trades the rebalancer declined.
    #[must_use]
    pub fn skipped_trades(&self) -> &[SkippedTrade] {
        &self.skipped_trades
    }

    /// Free-text warnings.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Cash left after all legs settle. Negative means a shortfall.
    #[must_use]
    pub const fn residual_cash(&self) -> f64 {
        self.residual_cash
    }

    /// Unmanaged-position handling mode.
    #[must_use]
    pub const fn unmanaged_handling(&self) -> UnmanagedHandling {
        self.unmanaged_handling
    }

    /// Tickers held outside the target model.
    #[must_use]
    pub fn unmanaged_positions(&self) -> &[String] {
        &self.unmanaged_positions
    }

    /// Error detail when the rebalance failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of legs on the given side.
    #[must_use]
    pub fn count_side(&self, side: TradeSide) -> usize {
        self.legs.iter().filter(|leg| leg.side == side).count()
    }
}

/// Builder for [`RebalanceResult`].
#[derive(Debug, Default)]
pub struct RebalanceResultBuilder {
    status: RebalanceStatus,
    legs: Vec<TradeLeg>,
    summary: BTreeMap<String, SummaryValue>,
    skipped_trades: Vec<SkippedTrade>,
    warnings: Vec<String>,
    residual_cash: f64,
    unmanaged_handling: UnmanagedHandling,
    unmanaged_positions: Vec<String>,
    error: Option<String>,
}

impl RebalanceResultBuilder {
    /// Set the overall status.
    #[must_use]
    pub const fn status(mut self, status: RebalanceStatus) -> Self {
        self.status = status;
        self
    }

    /// Append a trade leg.
    #[must_use]
    pub fn leg(mut self, leg: TradeLeg) -> Self {
        self.legs.push(leg);
        self
    }

    /// Append several trade legs.
    #[must_use]
    pub fn legs(mut self, legs: impl IntoIterator<Item = TradeLeg>) -> Self {
        self.legs.extend(legs);
        self
    }

    /// Set a summary entry.
    #[must_use]
    pub fn summary(mut self, key: impl Into<String>, value: impl Into<SummaryValue>) -> Self {
        self.summary.insert(key.into(), value.into());
        self
    }

    /// Append a skipped trade.
    #[must_use]
    pub fn skipped(mut self, skipped: SkippedTrade) -> Self {
        self.skipped_trades.push(skipped);
        self
    }

    /// Append a warning.
    #[must_use]
    pub fn warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Set the residual cash.
    #[must_use]
    pub const fn residual_cash(mut self, cash: f64) -> Self {
        self.residual_cash = cash;
        self
    }

    /// Set unmanaged-position handling and tickers.
    #[must_use]
    pub fn unmanaged(
        mut self,
        handling: UnmanagedHandling,
        tickers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.unmanaged_handling = handling;
        self.unmanaged_positions = tickers.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the result failed.
    #[must_use]
    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.status = RebalanceStatus::Error;
        self.error = Some(error.into());
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> RebalanceResult {
        RebalanceResult {
            status: self.status,
            legs: self.legs,
            summary: self.summary,
            skipped_trades: self.skipped_trades,
            warnings: self.warnings,
            residual_cash: self.residual_cash,
            unmanaged_handling: self.unmanaged_handling,
            unmanaged_positions: self.unmanaged_positions,
            error: self.error,
        }
    }
}

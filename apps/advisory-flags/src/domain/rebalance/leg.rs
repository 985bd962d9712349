//! Rebalance trade legs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::sanitize::{finite_or_null, number};
use crate::domain::shared::finite_or;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSide {
    /// Buy to increase weight.
    Buy,
    /// Sell to decrease weight.
    Sell,
}

impl TradeSide {
    /// Wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

fn default_leg_status() -> String {
    "pending".to_string()
}

/// One instrument-level line of a rebalance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeLeg {
    /// Instrument ticker.
    pub ticker: String,
    /// Trade direction.
    pub side: TradeSide,
    /// Shares to trade.
    #[serde(serialize_with = "finite_or_null")]
    pub quantity: f64,
    /// Dollar value of the trade.
    #[serde(serialize_with = "finite_or_null")]
    pub value: f64,
    /// Reference price.
    #[serde(serialize_with = "finite_or_null")]
    pub price: f64,
    /// Portfolio weight before the trade, in percent.
    #[serde(serialize_with = "finite_or_null")]
    pub weight_before: f64,
    /// Portfolio weight after the trade, in percent.
    #[serde(serialize_with = "finite_or_null")]
    pub weight_after: f64,
    /// Per-leg status (`pending`, `ok`, `error`, ...).
    #[serde(default = "default_leg_status")]
    pub status: String,
    /// Error detail for a failed leg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TradeLeg {
    /// Create a pending leg.
    #[must_use]
    pub fn new(ticker: impl Into<String>, side: TradeSide, quantity: f64, price: f64) -> Self {
        Self {
            ticker: ticker.into(),
            side,
            quantity,
            value: quantity * price,
            price,
            weight_before: 0.0,
            weight_after: 0.0,
            status: default_leg_status(),
            error: None,
        }
    }

    /// Set the before/after portfolio weights.
    #[must_use]
    pub const fn with_weights(mut self, before: f64, after: f64) -> Self {
        self.weight_before = before;
        self.weight_after = after;
        self
    }

    /// Override the dollar value.
    #[must_use]
    pub const fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Set the leg status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Mark the leg failed with an error detail.
    #[must_use]
    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.status = "error".to_string();
        self.error = Some(error.into());
        self
    }

    /// True when the leg reported a failure.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.status.as_str(), "error" | "failed")
    }

    /// Flat agent-facing record. Non-finite numbers become `0.0`.
    #[must_use]
    pub fn to_agent_record(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("ticker".into(), Value::String(self.ticker.clone()));
        fields.insert("side".into(), Value::String(self.side.as_str().into()));
        for (key, value) in [
            ("quantity", self.quantity),
            ("value", self.value),
            ("price", self.price),
            ("weight_before", self.weight_before),
            ("weight_after", self.weight_after),
            ("weight_change", self.weight_after - self.weight_before),
        ] {
            fields.insert(key.into(), number(finite_or(value, 0.0)));
        }
        fields.insert("status".into(), Value::String(self.status.clone()));
        fields.insert(
            "error".into(),
            self.error.clone().map_or(Value::Null, Value::String),
        );
        Value::Object(fields)
    }

    /// Full API record. Non-finite numbers become `null`; finite values are
    /// preserved exactly.
    #[must_use]
    pub fn to_api_record(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("ticker".into(), Value::String(self.ticker.clone()));
        fields.insert("side".into(), Value::String(self.side.as_str().into()));
        fields.insert("quantity".into(), number(self.quantity));
        fields.insert("value".into(), number(self.value));
        fields.insert("price".into(), number(self.price));
        fields.insert("weight_before".into(), number(self.weight_before));
        fields.insert("weight_after".into(), number(self.weight_after));
        fields.insert("status".into(), Value::String(self.status.clone()));
        if let Some(error) = &self.error {
            fields.insert("error".into(), Value::String(error.clone()));
        }
        Value::Object(fields)
    }
}

/// A trade the rebalancer declined to place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedTrade {
    /// Instrument ticker.
    pub ticker: String,
    /// Why the trade was skipped (e.g. "below minimum trade size").
    pub reason: String,
    /// Dollar value that would have traded.
    #[serde(default, serialize_with = "finite_or_null")]
    pub value: f64,
}

impl SkippedTrade {
    /// Create a skipped-trade record.
    #[must_use]
    pub fn new(ticker: impl Into<String>, reason: impl Into<String>, value: f64) -> Self {
        Self {
            ticker: ticker.into(),
            reason: reason.into(),
            value,
        }
    }

    pub(crate) fn to_record(&self, non_finite: Value) -> Value {
        let mut fields = Map::new();
        fields.insert("ticker".into(), Value::String(self.ticker.clone()));
        fields.insert("reason".into(), Value::String(self.reason.clone()));
        let value = if self.value.is_finite() {
            number(self.value)
        } else {
            non_finite
        };
        fields.insert("value".into(), value);
        Value::Object(fields)
    }
}

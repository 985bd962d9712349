//! Agent and API projections of a [`RebalanceResult`].

use serde_json::{Map, Value};

use super::leg::TradeSide;
use super::result::{RebalanceResult, SummaryValue};
use super::sanitize::number;
use crate::domain::shared::{coerce, finite_or};

/// Summary keys the agent snapshot always carries as floats.
pub const SUMMARY_NUMERIC_FIELDS: [&str; 6] = [
    "total_buy_value",
    "total_sell_value",
    "net_cash_flow",
    "turnover_pct",
    "max_drift_before",
    "max_drift_after",
];

fn count(n: usize) -> Value {
    Value::from(n)
}

impl SummaryValue {
    fn to_json(&self) -> Value {
        match self {
            Self::Number(v) => number(*v),
            Self::Text(s) => Value::String(s.clone()),
        }
    }
}

impl RebalanceResult {
    /// Flat record consumed by the rebalance flag rule set.
    ///
    /// Summary metrics in [`SUMMARY_NUMERIC_FIELDS`] are coerced to floats,
    /// defaulting to `0.0` when missing, textual and unparseable, or
    /// non-finite. Leg numbers are zeroed when non-finite.
    #[must_use]
    pub fn get_agent_snapshot(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("status".into(), Value::String(self.status().agent_status().into()));
        if let Some(error) = self.error() {
            fields.insert("error".into(), Value::String(error.to_string()));
        }

        fields.insert("trade_count".into(), count(self.legs().len()));
        fields.insert("sell_count".into(), count(self.count_side(TradeSide::Sell)));
        fields.insert("buy_count".into(), count(self.count_side(TradeSide::Buy)));
        fields.insert("skipped_count".into(), count(self.skipped_trades().len()));
        fields.insert("warning_count".into(), count(self.warnings().len()));
        fields.insert(
            "trades".into(),
            self.legs().iter().map(|leg| leg.to_agent_record()).collect(),
        );

        for key in SUMMARY_NUMERIC_FIELDS {
            let raw = self.summary().get(key).map(SummaryValue::to_json);
            fields.insert(key.into(), number(coerce(raw.as_ref(), 0.0)));
        }
        fields.insert("residual_cash".into(), number(finite_or(self.residual_cash(), 0.0)));

        fields.insert(
            "unmanaged_handling".into(),
            Value::String(self.unmanaged_handling().as_str().into()),
        );
        fields.insert(
            "unmanaged_positions".into(),
            self.unmanaged_positions().iter().cloned().map(Value::String).collect(),
        );
        fields.insert(
            "skipped_trades".into(),
            self.skipped_trades()
                .iter()
                .map(|skipped| skipped.to_record(number(0.0)))
                .collect(),
        );
        fields.insert(
            "warnings".into(),
            self.warnings().iter().cloned().map(Value::String).collect(),
        );
        Value::Object(fields)
    }

    /// Payload for the HTTP layer.
    ///
    /// The summary is passed through as-is and legs keep every field. No
    /// default coercion is applied; non-finite numbers become `null`.
    #[must_use]
    pub fn to_api_response(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("status".into(), Value::String(self.status().as_str().into()));
        if let Some(error) = self.error() {
            fields.insert("error".into(), Value::String(error.to_string()));
        }
        fields.insert(
            "summary".into(),
            Value::Object(
                self.summary()
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        );
        fields.insert(
            "trades".into(),
            self.legs().iter().map(|leg| leg.to_api_record()).collect(),
        );
        fields.insert(
            "skipped_trades".into(),
            self.skipped_trades()
                .iter()
                .map(|skipped| skipped.to_record(Value::Null))
                .collect(),
        );
        fields.insert(
            "warnings".into(),
            self.warnings().iter().cloned().map(Value::String).collect(),
        );
        fields.insert("residual_cash".into(), number(self.residual_cash()));

        let mut unmanaged = Map::new();
        unmanaged.insert(
            "handling".into(),
            Value::String(self.unmanaged_handling().as_str().into()),
        );
        unmanaged.insert(
            "positions".into(),
            self.unmanaged_positions().iter().cloned().map(Value::String).collect(),
        );
        fields.insert("unmanaged".into(), Value::Object(unmanaged));
        Value::Object(fields)
    }
}

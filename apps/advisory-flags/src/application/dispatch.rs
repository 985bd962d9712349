//! Rule-set dispatch by domain name.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, debug_span, warn};

use crate::domain::rules;
use crate::domain::shared::Flag;
use crate::error::AdvisoryError;

/// Flag-producing analysis domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum FlagDomain {
    /// Exit-signal evaluation.
    ExitSignal,
    /// Factor exposure and hedge recommendation.
    Factor,
    /// Futures term structure.
    FuturesCurve,
    /// Portfolio income projection.
    Income,
    /// Leverage capacity.
    Leverage,
    /// Option portfolio Greeks.
    Greeks,
    /// Risk score and compliance.
    Risk,
    /// Tax-loss harvesting.
    TaxHarvest,
    /// Rebalance trade result.
    Rebalance,
}

impl FlagDomain {
    /// Every domain, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::ExitSignal,
        Self::Factor,
        Self::FuturesCurve,
        Self::Income,
        Self::Leverage,
        Self::Greeks,
        Self::Risk,
        Self::TaxHarvest,
        Self::Rebalance,
    ];

    /// Snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExitSignal => "exit_signal",
            Self::Factor => "factor",
            Self::FuturesCurve => "futures_curve",
            Self::Income => "income",
            Self::Leverage => "leverage",
            Self::Greeks => "greeks",
            Self::Risk => "risk",
            Self::TaxHarvest => "tax_harvest",
            Self::Rebalance => "rebalance",
        }
    }

    /// The rule set for this domain.
    #[must_use]
    pub fn rule_set(self) -> fn(&Value) -> Vec<Flag> {
        match self {
            Self::ExitSignal => rules::generate_exit_signal_flags,
            Self::Factor => rules::generate_factor_flags,
            Self::FuturesCurve => rules::generate_futures_curve_flags,
            Self::Income => rules::generate_income_flags,
            Self::Leverage => rules::generate_leverage_flags,
            Self::Greeks => rules::generate_greeks_flags,
            Self::Risk => rules::generate_risk_flags,
            Self::TaxHarvest => rules::generate_tax_harvest_flags,
            Self::Rebalance => rules::generate_rebalance_flags,
        }
    }
}

impl fmt::Display for FlagDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlagDomain {
    type Err = AdvisoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str() == normalized)
            .ok_or_else(|| AdvisoryError::UnknownDomain(s.to_string()))
    }
}

/// Run the rule set for `domain` over `snapshot`.
#[must_use]
pub fn generate_flags(domain: FlagDomain, snapshot: &Value) -> Vec<Flag> {
    let _span = debug_span!("generate_flags", domain = %domain).entered();
    if !snapshot.is_object() {
        warn!(domain = %domain, kind = json_kind(snapshot), "snapshot is not an object");
    }
    let flags = (domain.rule_set())(snapshot);
    debug!(domain = %domain, flag_count = flags.len(), "flags generated");
    flags
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Exit-signal rule set.
//!
//! Interprets the outcome of per-position exit rule evaluation: the overall
//! assessment, rules that failed to evaluate, and any eligible sale.

use serde_json::Value;

use super::{Branch, first_match, status_failure};
use crate::domain::shared::{Flag, Record, format, sort_flags};

/// Outcome of a single exit rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitRuleOutcome {
    /// Rule name.
    pub name: String,
    /// Evaluation status (`"error"` marks a rule that failed to run).
    pub status: String,
}

/// Decoded exit-signal snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitSignalSnapshot {
    /// Position ticker (default "position").
    pub ticker: String,
    /// Overall assessment text, e.g. "STRONG EXIT - 3 rules triggered".
    pub overall_assessment: String,
    /// Whether a sale may be placed.
    pub trade_eligible: bool,
    /// Quantity recommended for sale.
    pub sell_quantity: f64,
    /// Total shares held.
    pub shares: f64,
    /// Per-rule outcomes.
    pub rules: Vec<ExitRuleOutcome>,
}

impl ExitSignalSnapshot {
    /// Decode from a snapshot record.
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            ticker: record.str_or("ticker", "position").to_string(),
            overall_assessment: record.str_or("overall_assessment", "").to_string(),
            trade_eligible: record.bool_or("trade_eligible", false),
            sell_quantity: record.f64_or("sell_quantity", 0.0),
            shares: record.f64_or("shares", 0.0),
            rules: record
                .records("rules")
                .map(|rule| ExitRuleOutcome {
                    name: rule.str_or("name", "unnamed").to_string(),
                    status: rule.str_or("status", "").to_string(),
                })
                .collect(),
        }
    }

    fn assessment_starts_with(&self, prefix: &str) -> bool {
        self.overall_assessment.starts_with(prefix)
    }
}

const ASSESSMENT_BRANCHES: [Branch<ExitSignalSnapshot>; 5] = [
    Branch {
        when: |s| s.assessment_starts_with("STRONG EXIT"),
        then: |s| {
            Flag::error(
                "strong_exit",
                format!("Strong exit signal on {}: {}", s.ticker, s.overall_assessment),
            )
        },
    },
    Branch {
        when: |s| s.assessment_starts_with("EXIT"),
        then: |s| {
            Flag::warning(
                "exit_signal",
                format!("Exit signal on {}: {}", s.ticker, s.overall_assessment),
            )
        },
    },
    Branch {
        when: |s| s.assessment_starts_with("MONITOR"),
        then: |s| {
            Flag::info(
                "monitor_position",
                format!("Monitor {} closely: {}", s.ticker, s.overall_assessment),
            )
        },
    },
    Branch {
        when: |s| s.assessment_starts_with("HOLD"),
        then: |s| {
            Flag::success(
                "hold_position",
                format!("No exit rules triggered for {}: {}", s.ticker, s.overall_assessment),
            )
        },
    },
    Branch {
        when: |s| s.assessment_starts_with("ERROR"),
        then: |s| {
            Flag::error(
                "assessment_error",
                format!("Exit evaluation for {} failed: {}", s.ticker, s.overall_assessment),
            )
        },
    },
];

/// Generate exit-signal flags.
#[must_use]
pub fn generate_exit_signal_flags(snapshot: &Value) -> Vec<Flag> {
    let record = Record::from_value_or_empty(snapshot);
    if let Some(failure) = status_failure(
        &record,
        "exit_evaluation_failed",
        "Exit signal evaluation failed",
    ) {
        return vec![failure];
    }
    let snapshot = ExitSignalSnapshot::from_record(&record);
    let mut flags = Vec::new();

    if let Some(flag) = first_match(&snapshot, &ASSESSMENT_BRANCHES) {
        flags.push(flag);
    }

    let failed: Vec<&str> = snapshot
        .rules
        .iter()
        .filter(|rule| rule.status == "error")
        .map(|rule| rule.name.as_str())
        .collect();
    if !failed.is_empty() {
        flags.push(Flag::warning(
            "rule_errors",
            format!(
                "{} failed to evaluate: {}",
                format::counted(failed.len() as i64, "exit rule"),
                failed.join(", ")
            ),
        ));
    }

    if snapshot.trade_eligible && snapshot.sell_quantity > 0.0 {
        let sell_pct = if snapshot.shares > 0.0 {
            snapshot.sell_quantity / snapshot.shares * 100.0
        } else {
            0.0
        };
        flags.push(
            Flag::info(
                "sell_recommended",
                format!(
                    "Sell {} shares of {} ({} of position)",
                    format::quantity(snapshot.sell_quantity),
                    snapshot.ticker,
                    format::pct(sell_pct)
                ),
            )
            .with_metric("sell_quantity", snapshot.sell_quantity)
            .with_metric("sell_pct", sell_pct),
        );
    }

    if flags.is_empty() {
        flags.push(Flag::info(
            "no_exit_assessment",
            format!("No exit assessment available for {}", snapshot.ticker),
        ));
    }

    sort_flags(flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::Severity;
    use serde_json::json;
    use test_case::test_case;

    fn kinds(flags: &[Flag]) -> Vec<&str> {
        flags.iter().map(|f| f.kind.as_str()).collect()
    }

    #[test_case("STRONG EXIT - 3 rules triggered", "strong_exit", Severity::Error ; "strong exit")]
    #[test_case("EXIT - stop loss", "exit_signal", Severity::Warning ; "exit")]
    #[test_case("MONITOR - 1 rule near trigger", "monitor_position", Severity::Info ; "monitor")]
    #[test_case("HOLD", "hold_position", Severity::Success ; "hold")]
    #[test_case("ERROR - price unavailable", "assessment_error", Severity::Error ; "error")]
    fn assessment_prefix_selects_one_branch(assessment: &str, kind: &str, severity: Severity) {
        let flags = generate_exit_signal_flags(&json!({
            "ticker": "AAPL",
            "overall_assessment": assessment,
        }));
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].kind, kind);
        assert_eq!(flags[0].severity, severity);
        assert!(flags[0].message.contains("AAPL"));
    }

    #[test]
    fn failed_rules_are_aggregated() {
        let flags = generate_exit_signal_flags(&json!({
            "overall_assessment": "HOLD",
            "rules": [
                {"name": "trailing_stop", "status": "error"},
                {"name": "profit_target", "status": "ok"},
                {"name": "time_stop", "status": "error"},
            ],
        }));
        assert_eq!(kinds(&flags), vec!["rule_errors", "hold_position"]);
        assert_eq!(
            flags[0].message,
            "2 exit rules failed to evaluate: trailing_stop, time_stop"
        );
    }

    #[test]
    fn eligible_sale_reports_quantity_and_share() {
        let flags = generate_exit_signal_flags(&json!({
            "ticker": "MSFT",
            "overall_assessment": "EXIT - stop loss",
            "trade_eligible": true,
            "sell_quantity": 50,
            "shares": 200,
        }));
        assert_eq!(kinds(&flags), vec!["exit_signal", "sell_recommended"]);
        assert_eq!(flags[1].message, "Sell 50 shares of MSFT (25.0% of position)");
        assert_eq!(flags[1].metric("sell_pct"), Some(25.0));
    }

    #[test]
    fn sale_without_shares_reports_zero_percent() {
        let flags = generate_exit_signal_flags(&json!({
            "trade_eligible": true,
            "sell_quantity": 10,
            "shares": 0,
        }));
        assert_eq!(flags[0].kind, "sell_recommended");
        assert!(flags[0].message.ends_with("(0.0% of position)"));
    }

    #[test]
    fn ineligible_sale_is_silent() {
        let flags = generate_exit_signal_flags(&json!({
            "overall_assessment": "EXIT",
            "trade_eligible": false,
            "sell_quantity": 10,
        }));
        assert_eq!(kinds(&flags), vec!["exit_signal"]);
    }

    #[test]
    fn unknown_assessment_falls_back() {
        let flags = generate_exit_signal_flags(&json!({"overall_assessment": "hold"}));
        assert_eq!(kinds(&flags), vec!["no_exit_assessment"]);
    }

    #[test]
    fn failed_status_short_circuits() {
        let flags = generate_exit_signal_flags(&json!({
            "status": "error",
            "overall_assessment": "STRONG EXIT",
            "trade_eligible": true,
            "sell_quantity": 10,
        }));
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].severity, Severity::Error);
        assert_eq!(flags[0].message, "Exit signal evaluation failed");
    }
}

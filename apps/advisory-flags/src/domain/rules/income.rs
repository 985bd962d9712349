//! Income projection rule set.

use serde_json::Value;

use super::{Branch, first_match, status_failure};
use crate::domain::shared::{Flag, Record, format, sort_flags};

const HIGH_YIELD_PCT: f64 = 4.0;
const LOW_YIELD_PCT: f64 = 1.0;
const LOW_COVERAGE_RATIO: f64 = 0.25;
const BROAD_COVERAGE_RATIO: f64 = 0.75;

/// Decoded income projection snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncomeSnapshot {
    /// Projected annual income in dollars.
    pub annual_income: f64,
    /// Annual income over current portfolio value, in percent.
    pub portfolio_yield_on_value: f64,
    /// Holdings analyzed.
    pub holding_count: i64,
    /// Holdings that produce income.
    pub income_holding_count: i64,
    /// Data-quality warnings raised during projection.
    pub warning_count: i64,
}

impl IncomeSnapshot {
    /// Decode from a snapshot record.
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            annual_income: record.f64_or("annual_income", 0.0),
            portfolio_yield_on_value: record.f64_or("portfolio_yield_on_value", 0.0),
            holding_count: record.count("holding_count"),
            income_holding_count: record.count("income_holding_count"),
            warning_count: record.count("warning_count"),
        }
    }

    /// Share of holdings producing income; `None` without holdings.
    #[must_use]
    pub fn coverage_ratio(&self) -> Option<f64> {
        (self.holding_count > 0)
            .then(|| self.income_holding_count as f64 / self.holding_count as f64)
    }
}

const YIELD_BRANCHES: [Branch<IncomeSnapshot>; 2] = [
    Branch {
        when: |s| s.portfolio_yield_on_value >= HIGH_YIELD_PCT,
        then: |s| {
            Flag::info(
                "high_yield",
                format!(
                    "Portfolio yields {} on current value",
                    format::pct(s.portfolio_yield_on_value)
                ),
            )
        },
    },
    Branch {
        when: |s| s.portfolio_yield_on_value < LOW_YIELD_PCT,
        then: |s| {
            Flag::info(
                "low_yield",
                format!(
                    "Portfolio yield of {} on current value is below 1%",
                    format::pct(s.portfolio_yield_on_value)
                ),
            )
        },
    },
];

/// Generate income projection flags.
#[must_use]
pub fn generate_income_flags(snapshot: &Value) -> Vec<Flag> {
    let record = Record::from_value_or_empty(snapshot);
    if let Some(failure) = status_failure(
        &record,
        "projection_failed",
        "Income projection failed",
    ) {
        return vec![failure];
    }
    let income = IncomeSnapshot::from_record(&record);

    if income.annual_income < 0.0 {
        return vec![Flag::warning(
            "negative_income",
            format!(
                "Projected annual income is negative ({}); review short positions and fees",
                format::currency(income.annual_income)
            ),
        )];
    }
    if income.annual_income == 0.0 {
        return vec![Flag::info(
            "no_income",
            "No projected income from current holdings",
        )];
    }

    let mut flags = Vec::new();
    if let Some(flag) = first_match(&income, &YIELD_BRANCHES) {
        flags.push(flag.with_metric("yield_pct", income.portfolio_yield_on_value));
    }

    if let Some(coverage) = income.coverage_ratio() {
        let detail = format!(
            "{} of {} pay income ({})",
            income.income_holding_count,
            format::counted(income.holding_count, "holding"),
            format::ratio_pct(coverage)
        );
        if coverage < LOW_COVERAGE_RATIO {
            flags.push(
                Flag::info("low_income_coverage", format!("Only {detail}"))
                    .with_metric("coverage_ratio", coverage),
            );
        } else if coverage >= BROAD_COVERAGE_RATIO {
            flags.push(
                Flag::success("broad_income_coverage", detail)
                    .with_metric("coverage_ratio", coverage),
            );
        }
    }

    if income.warning_count > 0 {
        flags.push(Flag::warning(
            "projection_warnings",
            format!(
                "{} had incomplete income data",
                format::counted(income.warning_count, "holding")
            ),
        ));
    }

    if flags.is_empty() {
        flags.push(Flag::success(
            "income_projected",
            format!(
                "Projected annual income of {} from {}",
                format::currency(income.annual_income),
                format::counted(income.income_holding_count, "position")
            ),
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

    #[test]
    fn negative_income_short_circuits() {
        let flags = generate_income_flags(&json!({
            "status": "success",
            "annual_income": -1200,
            "portfolio_yield_on_value": 9.0,
            "warning_count": 4,
        }));
        assert_eq!(kinds(&flags), vec!["negative_income"]);
        assert!(flags[0].message.contains("-$1,200"));
    }

    #[test]
    fn zero_income_short_circuits() {
        let flags = generate_income_flags(&json!({"status": "success", "annual_income": 0}));
        assert_eq!(kinds(&flags), vec!["no_income"]);
        assert_eq!(flags[0].severity, Severity::Info);
    }

    #[test_case(4.0, Some("high_yield") ; "high yield boundary")]
    #[test_case(3.99, None ; "just under high")]
    #[test_case(1.0, None ; "low boundary is exclusive")]
    #[test_case(0.5, Some("low_yield") ; "low yield")]
    fn yield_branches(yield_pct: f64, expected: Option<&str>) {
        let flags = generate_income_flags(&json!({
            "annual_income": 5000,
            "portfolio_yield_on_value": yield_pct,
            "holding_count": 10,
            "income_holding_count": 5,
        }));
        let yield_flag = flags
            .iter()
            .find(|f| f.kind == "high_yield" || f.kind == "low_yield")
            .map(|f| f.kind.as_str());
        assert_eq!(yield_flag, expected);
    }

    #[test]
    fn coverage_thresholds() {
        let low = generate_income_flags(&json!({
            "annual_income": 100,
            "portfolio_yield_on_value": 2.0,
            "holding_count": 10,
            "income_holding_count": 1,
        }));
        assert_eq!(kinds(&low), vec!["low_income_coverage"]);
        assert_eq!(low[0].message, "Only 1 of 10 holdings pay income (10%)");

        let broad = generate_income_flags(&json!({
            "annual_income": 100,
            "portfolio_yield_on_value": 2.0,
            "holding_count": 4,
            "income_holding_count": 3,
        }));
        assert_eq!(kinds(&broad), vec!["broad_income_coverage"]);
        assert_eq!(broad[0].metric("coverage_ratio"), Some(0.75));
    }

    #[test]
    fn zero_holdings_skip_coverage() {
        let flags = generate_income_flags(&json!({
            "annual_income": 100,
            "portfolio_yield_on_value": 2.0,
            "holding_count": 0,
            "income_holding_count": 0,
        }));
        assert_eq!(kinds(&flags), vec!["income_projected"]);
    }

    #[test]
    fn warnings_sort_first() {
        let flags = generate_income_flags(&json!({
            "annual_income": 24_000,
            "portfolio_yield_on_value": 4.5,
            "holding_count": 10,
            "income_holding_count": 9,
            "warning_count": 1,
        }));
        assert_eq!(
            kinds(&flags),
            vec!["projection_warnings", "high_yield", "broad_income_coverage"]
        );
        assert_eq!(flags[0].message, "1 holding had incomplete income data");
    }

    #[test]
    fn fallback_summarizes_income() {
        let flags = generate_income_flags(&json!({
            "status": "success",
            "annual_income": 12_345.67,
            "portfolio_yield_on_value": 2.2,
            "holding_count": 10,
            "income_holding_count": 5,
        }));
        assert_eq!(kinds(&flags), vec!["income_projected"]);
        assert_eq!(
            flags[0].message,
            "Projected annual income of $12,346 from 5 positions"
        );
    }

    #[test]
    fn failed_status_short_circuits() {
        let flags = generate_income_flags(&json!({"status": "error", "annual_income": -5}));
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].kind, "projection_failed");
        assert_eq!(flags[0].message, "Income projection failed");
    }
}

//! Factor / hedge recommendation rule set.

use serde_json::Value;

use super::{Branch, first_match, status_failure};
use crate::domain::shared::{Flag, Record, format, sort_flags};

/// Recommendation scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendationMode {
    /// Hedges for a single holding.
    #[default]
    Single,
    /// Hedges against portfolio-wide risk drivers.
    Portfolio,
}

impl RecommendationMode {
    fn parse(tag: &str) -> Self {
        if tag == "portfolio" {
            Self::Portfolio
        } else {
            Self::Single
        }
    }
}

/// A ranked hedge candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct HedgeCandidate {
    /// Hedge instrument ticker.
    pub ticker: String,
    /// Return correlation with the exposure being hedged.
    pub correlation: f64,
}

/// Decoded factor recommendation snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FactorSnapshot {
    /// Recommendation scope.
    pub mode: RecommendationMode,
    /// Holding being hedged in single mode.
    pub ticker: String,
    /// Number of hedge candidates produced.
    pub recommendation_count: i64,
    /// Number of portfolio risk drivers identified.
    pub driver_count: i64,
    /// Candidates, best first.
    pub top_recommendations: Vec<HedgeCandidate>,
}

impl FactorSnapshot {
    /// Decode from a snapshot record.
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            mode: RecommendationMode::parse(record.str_or("mode", "single")),
            ticker: record.str_or("ticker", "this position").to_string(),
            recommendation_count: record.count("recommendation_count"),
            driver_count: record.count("driver_count"),
            top_recommendations: record
                .records("top_recommendations")
                .map(|candidate| HedgeCandidate {
                    ticker: candidate.str_or("ticker", "top candidate").to_string(),
                    correlation: candidate.f64_or("correlation", 0.0),
                })
                .collect(),
        }
    }

    fn best_correlation(&self) -> f64 {
        self.top_recommendations
            .first()
            .map_or(0.0, |candidate| candidate.correlation)
    }

    fn best_ticker(&self) -> &str {
        self.top_recommendations
            .first()
            .map_or("top candidate", |candidate| candidate.ticker.as_str())
    }
}

const STRONG_HEDGE_CORRELATION: f64 = -0.5;
const WEAK_HEDGE_CORRELATION: f64 = -0.1;
const MULTI_DRIVER_COUNT: i64 = 3;
const DIVERSE_HEDGE_COUNT: i64 = 5;

const CORRELATION_BRANCHES: [Branch<FactorSnapshot>; 3] = [
    Branch {
        when: |s| s.best_correlation() < STRONG_HEDGE_CORRELATION,
        then: |s| {
            Flag::success(
                "strong_hedge",
                format!(
                    "{} offers a strong hedge (correlation {})",
                    s.best_ticker(),
                    format::correlation(s.best_correlation())
                ),
            )
        },
    },
    Branch {
        when: |s| s.best_correlation() > WEAK_HEDGE_CORRELATION,
        then: |s| {
            Flag::warning(
                "weak_hedge",
                format!(
                    "Best hedge {} is weakly correlated ({}); protection will be limited",
                    s.best_ticker(),
                    format::correlation(s.best_correlation())
                ),
            )
        },
    },
    Branch {
        when: |_| true,
        then: |s| {
            Flag::info(
                "moderate_hedge",
                format!(
                    "{} provides a partial hedge (correlation {})",
                    s.best_ticker(),
                    format::correlation(s.best_correlation())
                ),
            )
        },
    },
];

fn no_recommendations(snapshot: &FactorSnapshot) -> Flag {
    match snapshot.mode {
        RecommendationMode::Portfolio if snapshot.driver_count == 0 => Flag::success(
            "no_risk_drivers",
            "No dominant risk drivers detected; no hedges needed",
        ),
        RecommendationMode::Portfolio => Flag::warning(
            "unhedged_risk_drivers",
            format!(
                "{} identified but no suitable hedges found",
                format::counted(snapshot.driver_count, "risk driver")
            ),
        ),
        RecommendationMode::Single => Flag::info(
            "no_hedges_found",
            format!("No suitable hedge candidates found for {}", snapshot.ticker),
        ),
    }
}

/// Generate factor / hedge recommendation flags.
#[must_use]
pub fn generate_factor_flags(snapshot: &Value) -> Vec<Flag> {
    let record = Record::from_value_or_empty(snapshot);
    if let Some(failure) = status_failure(
        &record,
        "recommendation_failed",
        "Hedge recommendation failed",
    ) {
        return vec![failure];
    }
    let snapshot = FactorSnapshot::from_record(&record);

    if snapshot.recommendation_count == 0 {
        return vec![no_recommendations(&snapshot)];
    }

    let mut flags = Vec::new();
    if snapshot.top_recommendations.is_empty() {
        flags.push(Flag::info(
            "unranked_hedges",
            format!(
                "{} found without correlation detail",
                format::counted(snapshot.recommendation_count, "hedge candidate")
            ),
        ));
    } else if let Some(flag) = first_match(&snapshot, &CORRELATION_BRANCHES) {
        flags.push(flag.with_metric("correlation", snapshot.best_correlation()));
    }

    if snapshot.mode == RecommendationMode::Portfolio
        && snapshot.driver_count >= MULTI_DRIVER_COUNT
    {
        flags.push(Flag::warning(
            "multiple_risk_drivers",
            format!(
                "{} detected; a single hedge will not cover every exposure",
                format::counted(snapshot.driver_count, "risk driver")
            ),
        ));
    }

    if snapshot.recommendation_count >= DIVERSE_HEDGE_COUNT {
        flags.push(Flag::info(
            "diverse_hedges",
            format!(
                "{} available for diversification",
                format::counted(snapshot.recommendation_count, "hedge candidate")
            ),
        ));
    }

    sort_flags(flags)
}

//! Risk score rule set.

use serde_json::Value;

use super::{Branch, first_match, status_failure};
use crate::domain::shared::{Flag, Record, Severity, coerce, format, sort_flags};

/// Scores below this are considered high risk (overall and per component).
pub const HIGH_RISK_SCORE: f64 = 60.0;
/// Scores at or above this are considered excellent.
pub const EXCELLENT_SCORE: f64 = 90.0;
/// Violation count at which non-compliance escalates to `error`.
pub const CRITICAL_VIOLATION_COUNT: i64 = 3;

/// Decoded risk score snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskScoreSnapshot {
    /// Overall 0–100 score, when reported.
    pub overall_score: Option<f64>,
    /// Whether every risk limit is satisfied (default `true`).
    pub is_compliant: bool,
    /// Number of limit violations.
    pub violation_count: i64,
    /// Component scores in reported order.
    pub component_scores: Vec<(String, f64)>,
}

impl RiskScoreSnapshot {
    /// Decode from a snapshot record. Non-numeric component scores are skipped.
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Self {
        let component_scores = record
            .record("component_scores")
            .map(|components| {
                components
                    .iter()
                    .filter_map(|(name, score)| {
                        let score = coerce(Some(score), f64::NAN);
                        score.is_finite().then(|| (name.clone(), score))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            overall_score: record.opt_f64("overall_score"),
            is_compliant: record.bool_or("is_compliant", true),
            violation_count: record.count("violation_count"),
            component_scores,
        }
    }

    fn score(&self) -> f64 {
        self.overall_score.unwrap_or(f64::NAN)
    }
}

const SCORE_BRANCHES: [Branch<RiskScoreSnapshot>; 2] = [
    Branch {
        when: |s| s.score() < HIGH_RISK_SCORE,
        then: |s| {
            Flag::warning(
                "high_risk",
                format!("Risk score of {:.0}/100 signals elevated portfolio risk", s.score()),
            )
            .with_metric("overall_score", s.score())
        },
    },
    Branch {
        when: |s| s.score() >= EXCELLENT_SCORE,
        then: |s| {
            Flag::success(
                "excellent_risk",
                format!("Risk score of {:.0}/100 is excellent", s.score()),
            )
            .with_metric("overall_score", s.score())
        },
    },
];

fn compliant() -> Flag {
    Flag::success("compliant", "Portfolio is compliant with all risk limits")
}

/// Generate risk score flags.
#[must_use]
pub fn generate_risk_flags(snapshot: &Value) -> Vec<Flag> {
    let record = Record::from_value_or_empty(snapshot);
    if record.is_empty() {
        return vec![compliant()];
    }
    if let Some(failure) = status_failure(&record, "risk_analysis_failed", "Risk analysis failed") {
        return vec![failure];
    }
    let risk = RiskScoreSnapshot::from_record(&record);
    let mut flags = Vec::new();

    if !risk.is_compliant {
        let severity = if risk.violation_count >= CRITICAL_VIOLATION_COUNT {
            Severity::Error
        } else {
            Severity::Warning
        };
        flags.push(Flag::new(
            "compliance_violations",
            severity,
            format!(
                "{} detected",
                format::counted(risk.violation_count, "compliance violation")
            ),
        ));
    }

    if let Some(flag) = first_match(&risk, &SCORE_BRANCHES) {
        flags.push(flag);
    }

    for (name, score) in &risk.component_scores {
        if *score < HIGH_RISK_SCORE {
            flags.push(
                Flag::warning(
                    "weak_component",
                    format!("{} score is low ({score:.0}/100)", format::title_case(name)),
                )
                .with_metric("component_score", *score),
            );
        }
    }

    let excellent = flags.iter().any(|flag| flag.kind == "excellent_risk");
    if risk.is_compliant && !excellent {
        flags.push(compliant());
    }

    sort_flags(flags)
}

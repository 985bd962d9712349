//! Advisory flag record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::severity::Severity;

/// A single advisory finding derived from an analysis snapshot.
///
/// Flags carry no identity beyond their fields: two flags with equal content
/// are interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    /// Stable machine identifier (e.g. "high_risk").
    #[serde(rename = "type")]
    pub kind: String,
    /// Flag severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Extra numeric fields for downstream automation (e.g. computed ratios).
    /// Always finite.
    #[serde(flatten)]
    pub metrics: BTreeMap<String, f64>,
}

impl Flag {
    /// Field names a metric may not shadow.
    pub const RESERVED_KEYS: [&'static str; 3] = ["type", "severity", "message"];

    /// Create a new flag.
    #[must_use]
    pub fn new(kind: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            severity,
            message: message.into(),
            metrics: BTreeMap::new(),
        }
    }

    /// Create an error-level flag.
    #[must_use]
    pub fn error(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Error, message)
    }

    /// Create a warning-level flag.
    #[must_use]
    pub fn warning(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, message)
    }

    /// Create an info-level flag.
    #[must_use]
    pub fn info(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Info, message)
    }

    /// Create a success-level flag.
    #[must_use]
    pub fn success(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Success, message)
    }

    /// Attach a numeric field. Non-finite values and the reserved keys in
    /// [`Flag::RESERVED_KEYS`] are dropped so the flag stays JSON-serializable.
    #[must_use]
    pub fn with_metric(mut self, key: impl Into<String>, value: f64) -> Self {
        let key = key.into();
        if value.is_finite() && !Self::RESERVED_KEYS.contains(&key.as_str()) {
            self.metrics.insert(key, value);
        }
        self
    }

    /// Look up an attached numeric field.
    #[must_use]
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).copied()
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_builders() {
        let flag = Flag::warning("theta_drain", "Losing $60/day").with_metric("theta", -60.0);
        assert_eq!(flag.kind, "theta_drain");
        assert_eq!(flag.severity, Severity::Warning);
        assert_eq!(flag.metric("theta"), Some(-60.0));
    }

    #[test]
    fn non_finite_metrics_are_dropped() {
        let flag = Flag::info("ratio", "msg")
            .with_metric("nan", f64::NAN)
            .with_metric("inf", f64::INFINITY);
        assert!(flag.metrics.is_empty());
    }

    #[test]
    fn reserved_metric_keys_are_dropped() {
        let flag = Flag::warning("weak_component", "msg")
            .with_metric("severity", 10.0)
            .with_metric("type", 20.0)
            .with_metric("message", 30.0)
            .with_metric("score", 40.0);
        assert_eq!(flag.metrics.len(), 1);

        let json = serde_json::to_value(&flag).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["type"], "weak_component");
        let parsed: Flag = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, flag);
    }

    #[test]
    fn flag_display() {
        let display = format!("{}", Flag::error("analysis_failed", "Upstream timeout"));
        assert_eq!(display, "[error] analysis_failed: Upstream timeout");
    }

    #[test]
    fn flag_serializes_metrics_inline() {
        let flag = Flag::info("high_delta_exposure", "msg").with_metric("delta_ratio", 0.25);
        let json = serde_json::to_value(&flag).unwrap();
        assert_eq!(json["type"], "high_delta_exposure");
        assert_eq!(json["severity"], "info");
        assert_eq!(json["delta_ratio"], 0.25);

        let parsed: Flag = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, flag);
    }

    #[test]
    fn flag_without_metrics_omits_extras() {
        let json = serde_json::to_value(Flag::success("compliant", "ok")).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
    }
}

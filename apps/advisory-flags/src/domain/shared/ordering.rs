//! Severity ordering shared by every rule set.
//!
//! Sorting is a stable sort keyed on severity rank: flags of equal severity
//! keep their relative order and no flag is ever dropped.

use serde_json::Value;

use super::flag::Flag;
use super::severity::Severity;

/// Ranking scheme applied when sorting flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeverityOrder {
    /// `error, warning, info, success`. Missing or unrecognized tags rank as `info`.
    #[default]
    Standard,
    /// `error, warning, info`. Every other tag, `success` included, sorts last.
    Advisory,
}

impl SeverityOrder {
    /// Rank of a raw severity tag under this ordering.
    #[must_use]
    pub fn rank(self, tag: Option<&str>) -> u8 {
        let severity = tag.and_then(Severity::from_tag);
        match self {
            Self::Standard => severity.unwrap_or(Severity::Info).rank(),
            Self::Advisory => match severity {
                Some(Severity::Error) => 0,
                Some(Severity::Warning) => 1,
                Some(Severity::Info) => 2,
                Some(Severity::Success) | None => 3,
            },
        }
    }
}

/// Anything carrying a (possibly missing) severity tag.
pub trait SeverityTagged {
    /// The raw severity tag, if any.
    fn severity_tag(&self) -> Option<&str>;
}

impl SeverityTagged for Flag {
    fn severity_tag(&self) -> Option<&str> {
        Some(self.severity.as_str())
    }
}

impl SeverityTagged for Value {
    fn severity_tag(&self) -> Option<&str> {
        self.get("severity").and_then(Value::as_str)
    }
}

/// Stable-sort items by severity rank under the given ordering.
#[must_use]
pub fn sort_by_severity<T: SeverityTagged>(mut items: Vec<T>, order: SeverityOrder) -> Vec<T> {
    items.sort_by_key(|item| order.rank(item.severity_tag()));
    items
}

/// Sort flags with the standard four-level order.
#[must_use]
pub fn sort_flags(flags: Vec<Flag>) -> Vec<Flag> {
    sort_by_severity(flags, SeverityOrder::Standard)
}

/// Sort loosely-typed flag records (e.g. flags merged from external
/// producers). Records with a missing or unknown `severity` rank as `info`
/// and are otherwise left untouched.
#[must_use]
pub fn sort_flag_records(records: Vec<Value>) -> Vec<Value> {
    sort_by_severity(records, SeverityOrder::Standard)
}

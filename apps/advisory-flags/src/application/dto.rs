//! Flag report DTOs

use serde::{Deserialize, Serialize};

use super::dispatch::FlagDomain;
use crate::domain::shared::{Flag, Severity};

/// Flags per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    /// Error flags.
    pub error: usize,
    /// Warning flags.
    pub warning: usize,
    /// Info flags.
    pub info: usize,
    /// Success flags.
    pub success: usize,
}

impl SeverityCounts {
    /// Tally flags by severity.
    #[must_use]
    pub fn tally(flags: &[Flag]) -> Self {
        flags.iter().fold(Self::default(), |mut counts, flag| {
            match flag.severity {
                Severity::Error => counts.error += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
                Severity::Success => counts.success += 1,
            }
            counts
        })
    }

    /// Total flags counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.error + self.warning + self.info + self.success
    }
}

/// DTO for one rule-set run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagReport {
    /// Domain evaluated.
    pub domain: FlagDomain,
    /// Flags in severity order.
    pub flags: Vec<Flag>,
    /// Per-severity counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<SeverityCounts>,
    /// Most severe flag present.
    pub highest: Option<Severity>,
}

impl FlagReport {
    /// Build a report with counts.
    #[must_use]
    pub fn new(domain: FlagDomain, flags: Vec<Flag>) -> Self {
        let highest = flags.iter().map(|flag| flag.severity).min();
        Self {
            domain,
            counts: Some(SeverityCounts::tally(&flags)),
            highest,
            flags,
        }
    }

    /// Drop the per-severity counts.
    #[must_use]
    pub fn without_counts(mut self) -> Self {
        self.counts = None;
        self
    }

    /// True when any error flag is present.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.highest == Some(Severity::Error)
    }
}

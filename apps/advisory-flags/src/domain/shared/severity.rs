//! Flag severity taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Advisory flag severity.
///
/// Declaration order is presentation order: `Error` is the most urgent and
/// sorts first, `Success` the least urgent and sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Failure of the upstream analysis or a finding that needs immediate action.
    Error,
    /// Adverse finding worth attention.
    Warning,
    /// Neutral observation.
    Info,
    /// Positive confirmation.
    Success,
}

impl Severity {
    /// All severities in presentation order.
    pub const ALL: [Self; 4] = [Self::Error, Self::Warning, Self::Info, Self::Success];

    /// Wire tag (`"error"`, `"warning"`, `"info"`, `"success"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Success => "success",
        }
    }

    /// Numeric rank; lower is more urgent.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warning => 1,
            Self::Info => 2,
            Self::Success => 3,
        }
    }

    /// Parse a wire tag. Unrecognized tags yield `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "success" => Some(Self::Success),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Report output configuration.

use serde::{Deserialize, Serialize};

use super::observability::default_true;

/// How flag reports are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON.
    #[serde(default = "default_true")]
    pub pretty: bool,
    /// Include per-severity counts in reports.
    #[serde(default = "default_true")]
    pub include_counts: bool,
    /// Indent width for pretty output.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            include_counts: true,
            indent: default_indent(),
        }
    }
}

const fn default_indent() -> usize {
    2
}

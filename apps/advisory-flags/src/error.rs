//! Error types for the advisory flag engine.
//!
//! Rule sets themselves are total and never fail; these errors cover the
//! boundary around them: choosing a domain, decoding snapshot JSON, reading
//! files and loading configuration.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised outside the rule sets.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    /// The named flag domain does not exist.
    #[error("unknown flag domain '{0}'")]
    UnknownDomain(String),

    /// A snapshot document could not be decoded.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(#[source] serde_json::Error),

    /// Reading an input failed.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Input path, or `-` for stdin.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Result alias for boundary operations.
pub type Result<T> = std::result::Result<T, AdvisoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_domain_message() {
        let err = AdvisoryError::UnknownDomain("weather".into());
        assert_eq!(err.to_string(), "unknown flag domain 'weather'");
    }

    #[test]
    fn config_error_is_transparent() {
        let err = AdvisoryError::from(ConfigError::ValidationError("bad level".into()));
        assert_eq!(err.to_string(), "Config validation failed: bad level");
    }

    #[test]
    fn invalid_snapshot_wraps_json_error() {
        let Err(source) = serde_json::from_str::<serde_json::Value>("{") else {
            panic!("expected parse failure");
        };
        let err = AdvisoryError::InvalidSnapshot(source);
        assert!(err.to_string().starts_with("invalid snapshot:"));
    }
}

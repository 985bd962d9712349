//! Configuration for the advisory flag engine.
//!
//! Loads the YAML config with environment variable interpolation. Rule-set
//! thresholds are fixed constants and are not configurable here; config
//! only governs logging and report output.
//!
//! # Usage
//!
//! ```rust,ignore
//! use advisory_flags::config::load_config;
//!
//! // Default path (config.yaml, or $ADVISORY_CONFIG)
//! let config = load_config(None)?;
//!
//! // Explicit path
//! let config = load_config(Some("deploy/advisory.yaml"))?;
//! ```

mod observability;
mod output;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig};
pub use output::OutputConfig;

/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Environment variable overriding the default config path.
pub const CONFIG_PATH_ENV: &str = "ADVISORY_CONFIG";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Report output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Load configuration from a YAML file with environment variable interpolation.
///
/// With `path` unset, reads `$ADVISORY_CONFIG` or `config.yaml`; a missing
/// file at that default location yields [`Config::default`]. An explicit
/// path must exist.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let (path, explicit) = match path {
        Some(p) => (p.to_string(), true),
        None => match std::env::var(CONFIG_PATH_ENV) {
            Ok(p) if !p.is_empty() => (p, true),
            _ => (DEFAULT_CONFIG_PATH.to_string(), false),
        },
    };

    if !explicit && !Path::new(&path).exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is a compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |caps: &regex::Captures<'_>| {
        let default_value = caps.get(2).map_or("", |m| m.as_str());
        match std::env::var(&caps[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let level = config.observability.logging.level.to_ascii_lowercase();
    if !VALID_LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.level must be one of: {VALID_LOG_LEVELS:?}"
        )));
    }

    if config.output.indent > 8 {
        return Err(ConfigError::ValidationError(
            "output.indent must be at most 8".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.observability.logging.level, "info");
        assert_eq!(config.observability.logging.format, LogFormat::Pretty);
        assert!(config.output.pretty);
        assert!(config.output.include_counts);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_partial_config() {
        let yaml = r"
observability:
  logging:
    level: debug
";

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load partial config: {e}"),
        };
        assert_eq!(config.observability.logging.level, "debug");
        assert_eq!(config.observability.logging.format, LogFormat::Pretty);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r"
observability:
  logging:
    level: warn
    format: json
    include_spans: false
output:
  pretty: false
  include_counts: false
  indent: 4
";

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should parse full config: {e}"),
        };
        assert_eq!(config.observability.logging.format, LogFormat::Json);
        assert!(!config.observability.logging.include_spans);
        assert!(!config.output.pretty);
        assert!(!config.output.include_counts);
        assert_eq!(config.output.indent, 4);
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "level: ${ADVISORY_CONFIG_TEST_NONEXISTENT_VAR:-warn}";
        assert_eq!(interpolate_env_vars(input), "level: warn");
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "level: ${ADVISORY_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "level: ");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax
    fn test_env_var_with_default_uses_existing() {
        let result = interpolate_env_vars("path: ${PATH:-default}");
        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_interpolated_yaml_loads() {
        let yaml = r"
observability:
  logging:
    level: ${ADVISORY_CONFIG_TEST_LEVEL_UNSET:-error}
";
        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load interpolated config: {e}"),
        };
        assert_eq!(config.observability.logging.level, "error");
    }

    #[test]
    fn test_validation_invalid_level() {
        let yaml = r"
observability:
  logging:
    level: verbose
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for invalid level");
        };
        assert!(err.to_string().contains("level"));
    }

    #[test]
    fn test_invalid_format_is_parse_error() {
        let yaml = r"
observability:
  logging:
    format: xml
";
        let result = load_config_from_string(yaml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validation_indent() {
        let yaml = r"
output:
  indent: 12
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for indent");
        };
        assert!(err.to_string().contains("indent"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("tempdir: {e}"),
        };
        let path = dir.path().join("advisory.yaml");
        if let Err(e) = std::fs::write(&path, "output:\n  pretty: false\n") {
            panic!("write config: {e}");
        }
        let config = match load_config(path.to_str()) {
            Ok(c) => c,
            Err(e) => panic!("should load file: {e}"),
        };
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = load_config(Some("/nonexistent/advisory-flags/config.yaml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}

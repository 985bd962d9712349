//! Snapshot input and report rendering.

use std::io::Read;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;

use crate::config::OutputConfig;
use crate::error::{AdvisoryError, Result};

/// Path meaning "read standard input".
pub const STDIN_PATH: &str = "-";

/// Read a JSON document from `path`, or stdin when `path` is `None` or `-`.
///
/// # Errors
///
/// Returns `AdvisoryError::Io` if the input cannot be read and
/// `AdvisoryError::InvalidSnapshot` if it is not valid JSON for `T`.
pub fn read_json<T: DeserializeOwned>(path: Option<&Path>) -> Result<T> {
    let path = path.unwrap_or_else(|| Path::new(STDIN_PATH));
    let io_error = |source| AdvisoryError::Io {
        path: path.display().to_string(),
        source,
    };
    let contents = if path == Path::new(STDIN_PATH) {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_error)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(io_error)?
    };
    parse_json(&contents)
}

/// Parse a JSON document.
///
/// # Errors
///
/// Returns `AdvisoryError::InvalidSnapshot` on malformed input.
pub fn parse_json<T: DeserializeOwned>(contents: &str) -> Result<T> {
    serde_json::from_str(contents).map_err(AdvisoryError::InvalidSnapshot)
}

/// Render `value` as JSON per the output settings.
///
/// # Errors
///
/// Returns `AdvisoryError::Serialization` if `value` cannot be serialized.
pub fn render_json<T: Serialize>(value: &T, output: &OutputConfig) -> Result<String> {
    if !output.pretty {
        return serde_json::to_string(value).map_err(AdvisoryError::Serialization);
    }
    let indent = " ".repeat(output.indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(AdvisoryError::Serialization)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn compact_rendering() {
        let output = OutputConfig {
            pretty: false,
            ..OutputConfig::default()
        };
        let rendered = render_json(&json!({"a": 1}), &output).unwrap();
        assert_eq!(rendered, r#"{"a":1}"#);
    }

    #[test]
    fn pretty_rendering_uses_indent() {
        let output = OutputConfig {
            indent: 4,
            ..OutputConfig::default()
        };
        let rendered = render_json(&json!({"a": 1}), &output).unwrap();
        assert_eq!(rendered, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"{"status": "success"}"#).unwrap();
        let value: Value = read_json(Some(file.path())).unwrap();
        assert_eq!(value["status"], "success");
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = read_json::<Value>(Some(Path::new("/nonexistent/snapshot.json")));
        assert!(matches!(result, Err(AdvisoryError::Io { .. })));
    }

    #[test]
    fn malformed_json_is_invalid_snapshot() {
        let result = parse_json::<Value>("{\"status\": ");
        assert!(matches!(result, Err(AdvisoryError::InvalidSnapshot(_))));
    }
}

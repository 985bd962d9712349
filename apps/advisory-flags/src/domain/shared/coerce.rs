//! Defensive numeric coercion for untrusted snapshot fields.

use serde_json::Value;

/// Convert an untrusted value to a finite float.
///
/// Numbers, numeric strings and booleans convert; anything else, a failed
/// parse, or a non-finite result yields `default`.
#[must_use]
pub fn coerce(value: Option<&Value>, default: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    finite_or(parsed.unwrap_or(default), default)
}

/// `value` if finite, else `default`.
#[must_use]
pub fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() { value } else { default }
}

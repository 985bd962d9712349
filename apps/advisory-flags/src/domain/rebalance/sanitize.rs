//! JSON-safety for numeric values.
//!
//! JSON has no representation for NaN or infinities; they become `null`.

use serde::Serializer;
use serde_json::{Number, Value};

/// JSON number for a finite float, `null` otherwise.
#[must_use]
pub fn number(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Serde helper writing non-finite floats as `null`.
pub fn finite_or_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

/// True when no float anywhere in `value` is non-finite.
///
/// `serde_json::Value` cannot hold non-finite numbers, so this only fails
/// for values assembled outside [`number`]; it exists for assertions at the
/// projection boundary.
#[must_use]
pub fn is_json_safe(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().is_none_or(f64::is_finite),
        Value::Array(items) => items.iter().all(is_json_safe),
        Value::Object(fields) => fields.values().all(is_json_safe),
        Value::Null | Value::Bool(_) | Value::String(_) => true,
    }
}

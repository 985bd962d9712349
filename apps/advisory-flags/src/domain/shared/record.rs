//! Read-only view over a loosely-typed snapshot record.
//!
//! Every accessor is total: absent keys and wrong-typed values degrade to the
//! caller's default instead of failing.

use serde_json::{Map, Value};

use super::coerce::coerce;

/// Borrowed snapshot record.
#[derive(Debug, Clone, Copy, Default)]
pub struct Record<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Record<'a> {
    /// Wrap a JSON object.
    #[must_use]
    pub const fn new(fields: &'a Map<String, Value>) -> Self {
        Self {
            fields: Some(fields),
        }
    }

    /// A record with no fields.
    #[must_use]
    pub const fn empty() -> Self {
        Self { fields: None }
    }

    /// View a JSON value as a record, or `None` if it is not an object.
    #[must_use]
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    /// View a JSON value as a record, treating non-objects as empty.
    #[must_use]
    pub fn from_value_or_empty(value: &'a Value) -> Self {
        Self::from_value(value).unwrap_or_default()
    }

    /// Raw field lookup. Explicit `null` counts as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields?.get(key).filter(|v| !v.is_null())
    }

    /// True when the record has no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_none_or(Map::is_empty)
    }

    /// Numeric field coerced to a finite float.
    #[must_use]
    pub fn f64_or(&self, key: &str, default: f64) -> f64 {
        coerce(self.get(key), default)
    }

    /// Numeric field, or `None` when absent or not convertible.
    #[must_use]
    pub fn opt_f64(&self, key: &str) -> Option<f64> {
        let value = coerce(self.get(key), f64::NAN);
        value.is_finite().then_some(value)
    }

    /// Integral count field (fractional parts truncate).
    #[must_use]
    pub fn count(&self, key: &str) -> i64 {
        self.f64_or(key, 0.0) as i64
    }

    /// String field, or `None` when absent or not a string.
    #[must_use]
    pub fn opt_str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// String field with a default.
    #[must_use]
    pub fn str_or<'b>(&self, key: &str, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.opt_str(key).unwrap_or(default)
    }

    /// Boolean field. Non-boolean values use truthiness.
    #[must_use]
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(other) => truthy(other),
            None => default,
        }
    }

    /// Array field, empty when absent or not an array.
    #[must_use]
    pub fn list(&self, key: &str) -> &'a [Value] {
        match self.get(key) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// Object elements of an array field; non-object elements are skipped.
    pub fn records(&self, key: &str) -> impl Iterator<Item = Record<'a>> + use<'a> {
        self.list(key).iter().filter_map(Record::from_value)
    }

    /// Nested object field.
    #[must_use]
    pub fn record(&self, key: &str) -> Option<Self> {
        self.get(key).and_then(Record::from_value)
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a String, &'a Value)> + use<'a> {
        self.fields.into_iter().flat_map(Map::iter)
    }
}

/// Truthiness of a JSON value: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
#[must_use]
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Display name of a list entry: a bare string, or the first string found
/// under `keys` in an object entry.
#[must_use]
pub fn entry_name<'a>(entry: &'a Value, keys: &[&str]) -> Option<&'a str> {
    match entry {
        Value::String(s) => Some(s.as_str()),
        Value::Object(fields) => keys
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_accessors() {
        let value = json!({"a": 1.5, "b": "2", "c": "x", "d": null});
        let record = Record::from_value(&value).unwrap();
        assert_eq!(record.f64_or("a", 0.0), 1.5);
        assert_eq!(record.f64_or("b", 0.0), 2.0);
        assert_eq!(record.f64_or("c", 9.0), 9.0);
        assert_eq!(record.f64_or("d", 9.0), 9.0);
        assert_eq!(record.opt_f64("a"), Some(1.5));
        assert_eq!(record.opt_f64("c"), None);
        assert_eq!(record.opt_f64("missing"), None);
    }

    #[test]
    fn count_truncates() {
        let value = json!({"n": 3.9, "s": "4"});
        let record = Record::from_value(&value).unwrap();
        assert_eq!(record.count("n"), 3);
        assert_eq!(record.count("s"), 4);
        assert_eq!(record.count("missing"), 0);
    }

    #[test]
    fn string_and_bool_accessors() {
        let value = json!({"s": "gross", "n": 5, "t": true, "z": 0});
        let record = Record::from_value(&value).unwrap();
        assert_eq!(record.str_or("s", "x"), "gross");
        assert_eq!(record.str_or("n", "x"), "x");
        assert!(record.bool_or("t", false));
        assert!(!record.bool_or("z", true));
        assert!(record.bool_or("missing", true));
    }

    #[test]
    fn list_and_nested_accessors() {
        let value = json!({"items": [{"v": 1}, "skip", {"v": 2}], "nested": {"k": 1}, "scalar": 1});
        let record = Record::from_value(&value).unwrap();
        assert_eq!(record.list("items").len(), 3);
        assert_eq!(record.records("items").count(), 2);
        assert!(record.list("scalar").is_empty());
        assert!(record.record("nested").is_some());
        assert!(record.record("scalar").is_none());
    }

    #[test]
    fn non_object_values() {
        assert!(Record::from_value(&json!([1, 2])).is_none());
        let fallback = json!("text");
        assert!(Record::from_value_or_empty(&fallback).is_empty());
        assert!(Record::empty().is_empty());
        assert!(Record::empty().get("anything").is_none());
    }

    #[test]
    fn truthiness() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!([])));
        assert!(!truthy(&json!({})));
        assert!(truthy(&json!(0.1)));
        assert!(truthy(&json!("no")));
    }

    #[test]
    fn entry_names() {
        assert_eq!(entry_name(&json!("gross"), &["constraint"]), Some("gross"));
        assert_eq!(
            entry_name(&json!({"limit": "net"}), &["constraint", "limit"]),
            Some("net")
        );
        assert_eq!(entry_name(&json!({"other": 1}), &["constraint"]), None);
        assert_eq!(entry_name(&json!(3), &["constraint"]), None);
    }
}

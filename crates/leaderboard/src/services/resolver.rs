use serde_json::Value;

use crate::models::FieldAlias;

/// Returns the first non-null value found for `alias`, if any.
///
/// Nested paths are tried before flat keys. Non-object records never match.
pub fn resolve<'a>(record: &'a Value, alias: &FieldAlias) -> Option<&'a Value> {
    alias
        .nested
        .iter()
        .find_map(|path| resolve_path(record, path))
        .or_else(|| resolve_flat(record, alias.keys))
}

/// Like [`resolve`], falling back to `default` when nothing matches.
pub fn resolve_or<'a>(record: &'a Value, alias: &FieldAlias, default: &'a Value) -> &'a Value {
    resolve(record, alias).unwrap_or(default)
}

/// Walks `path` through nested objects. A null at the end counts as absent.
pub fn resolve_path<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = record;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    (!current.is_null()).then_some(current)
}

/// First non-null value among the flat `keys` of an object record.
pub fn resolve_flat<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = record.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

/// Resolves `alias` and coerces the value to display text.
///
/// Objects and arrays have no text form and become an empty string.
pub fn resolve_text(record: &Value, alias: &FieldAlias, default: &str) -> String {
    match resolve(record, alias) {
        Some(value) => value_to_text(value).unwrap_or_default(),
        None => default.to_string(),
    }
}

/// Resolves an identifier, coercing numbers to strings. Empty values are `None`.
pub fn resolve_id(record: &Value, alias: &FieldAlias) -> Option<String> {
    resolve(record, alias)
        .and_then(value_to_text)
        .filter(|id| !id.is_empty())
}

/// Text form of a scalar JSON value.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Positive integer form of a value: integral numbers, or strings whose
/// digits form one (`"12"`, `"P12"`).
pub fn value_to_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => {
            let digits: String = s.chars().filter(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

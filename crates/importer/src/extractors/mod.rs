use serde_json::Value;

use crate::{ImporterError, Result};

/// Keys that conventionally hold the leaderboard array, in priority order.
pub const LEADERBOARD_KEYS: &[&str] = &[
    "leaderboard",
    "entries",
    "results",
    "data",
    "Leaderboard",
    "Entries",
    "Results",
];

/// Returns the record array of an exported leaderboard.
///
/// The document may be the array itself or an object wrapping it. Known keys
/// are tried at the top level and under `track_info`; failing that, the
/// first non-empty array at the top level or one level down is used.
pub fn extract_leaderboard(document: &Value) -> Result<&[Value]> {
    if let Value::Array(records) = document {
        return Ok(records);
    }

    let object = document.as_object().ok_or(ImporterError::SchemaNotFound)?;

    keyed(document)
        .or_else(|| document.get("track_info").and_then(keyed))
        .or_else(|| object.values().find_map(non_empty_array))
        .or_else(|| {
            object
                .values()
                .filter_map(Value::as_object)
                .find_map(|nested| nested.values().find_map(non_empty_array))
        })
        .map(Vec::as_slice)
        .ok_or(ImporterError::SchemaNotFound)
}

fn keyed(container: &Value) -> Option<&Vec<Value>> {
    LEADERBOARD_KEYS
        .iter()
        .find_map(|key| container.get(*key).and_then(Value::as_array))
}

fn non_empty_array(value: &Value) -> Option<&Vec<Value>> {
    value.as_array().filter(|records| !records.is_empty())
}

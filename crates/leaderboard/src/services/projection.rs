use std::collections::HashSet;

use serde_json::Value;

use super::formatting::EMPTY_CELL;
use super::ranking;
use crate::models::{CanonicalEntry, ColumnDescriptor, fields};

/// Ordered visible columns for a dataset whose records carry `sample_keys`.
///
/// Each key resolves to the first descriptor whose id or aliases match it.
/// Unmatched keys and hidden columns are dropped, as are repeated ids.
/// Visible synthetic columns are always included. The result is sorted by
/// `order`.
pub fn project<'a, K: AsRef<str>>(
    sample_keys: &[K],
    descriptors: &'a [ColumnDescriptor],
) -> Vec<&'a ColumnDescriptor> {
    let mut seen = HashSet::new();
    let mut columns: Vec<&ColumnDescriptor> = sample_keys
        .iter()
        .filter_map(|key| descriptors.iter().find(|d| d.matches(key.as_ref())))
        .chain(descriptors.iter().filter(|d| d.synthetic))
        .filter(|d| d.visible)
        .filter(|d| seen.insert(d.id))
        .collect();

    columns.sort_by_key(|d| d.order);
    columns
}

/// Raw value of one cell. Synthetic columns are computed from the row.
pub fn cell_value(column: &ColumnDescriptor, entry: &CanonicalEntry) -> Value {
    if column.id == fields::GAP_PERCENT.field {
        return Value::from(ranking::compute_gap_percent(entry, None));
    }
    entry.field(column.id)
}

/// Display text of one cell. Never fails, whatever the value type.
pub fn format_cell(column: &ColumnDescriptor, entry: &CanonicalEntry) -> String {
    let value = cell_value(column, entry);
    match column.format {
        Some(format) => format(&value, entry),
        None => default_format(&value),
    }
}

fn default_format(value: &Value) -> String {
    match value {
        Value::Null => EMPTY_CELL.to_string(),
        Value::String(s) if s.trim().is_empty() => EMPTY_CELL.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

use serde_json::Value;

use super::formatting::normalize_track_name;
use super::resolver::{resolve, resolve_id, resolve_text, value_to_count};
use super::time_parser::parse_gap_and_lap;
use crate::models::{CanonicalEntry, FieldAlias, fields};

const TRACK_INFO_NAME: FieldAlias = FieldAlias {
    field: "track",
    nested: &[&["track_info", "Name"], &["track_info", "name"]],
    keys: &["track_name"],
};

const TRACK_INFO_ID: FieldAlias = FieldAlias {
    field: "track_id",
    nested: &[&["track_info", "Id"], &["track_info", "ID"]],
    keys: &[],
};

const TRACK_INFO_CLASS: FieldAlias = FieldAlias {
    field: "car_class",
    nested: &[&["track_info", "ClassName"], &["track_info", "class_name"]],
    keys: &[],
};

const NESTED_CLASS_NAME: FieldAlias = FieldAlias {
    field: "car_class",
    nested: &[&["car_class", "class", "Name"], &["car_class", "class", "name"]],
    keys: &[],
};

const NESTED_CAR_NAME: FieldAlias = FieldAlias {
    field: "car",
    nested: &[&["car_class", "car", "Name"], &["car_class", "car", "name"]],
    keys: &[],
};

/// Leaderboard-level information used when a record omits a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeContext {
    pub track_name: Option<String>,
    pub track_id: Option<String>,
    /// Class named by the document header.
    pub default_class_name: Option<String>,
    /// Class of the first record, for producers that only stamp it once.
    pub first_class_name: Option<String>,
    pub first_car_name: Option<String>,
    pub total_entries: u32,
}

impl NormalizeContext {
    /// Context for a bare record array.
    pub fn for_records(records: &[Value]) -> Self {
        Self::from_document(&Value::Null, records)
    }

    /// Context from a wrapper document such as
    /// `{"track_info": {"Name": ..., "Id": ...}, "leaderboard": [...]}`.
    pub fn from_document(document: &Value, records: &[Value]) -> Self {
        let first = records.first().unwrap_or(&Value::Null);

        Self {
            track_name: resolve_id(document, &TRACK_INFO_NAME),
            track_id: resolve_id(document, &TRACK_INFO_ID),
            default_class_name: resolve_id(document, &TRACK_INFO_CLASS),
            first_class_name: resolve_id(first, &NESTED_CLASS_NAME),
            first_car_name: resolve_id(first, &NESTED_CAR_NAME),
            total_entries: saturating_u32(records.len()),
        }
    }
}

/// Normalizes one record. `index` is its zero-based position in the source
/// array; a nonzero `total_entries` overrides any count on the record.
pub fn normalize(
    record: &Value,
    context: &NormalizeContext,
    index: usize,
    total_entries: u32,
) -> CanonicalEntry {
    let text = |alias: &FieldAlias| resolve_text(record, alias, "");

    let position = resolve(record, &fields::POSITION)
        .and_then(positive_integer)
        .unwrap_or_else(|| saturating_u32(index + 1));

    let name = match text(&fields::NAME) {
        name if name.is_empty() => "Unknown".to_string(),
        name => name,
    };

    let car_class = first_non_empty([
        Some(text(&fields::CAR_CLASS)),
        context.first_class_name.clone(),
        context.default_class_name.clone(),
    ]);
    let car = first_non_empty([Some(text(&fields::CAR)), context.first_car_name.clone()]);
    let track = first_non_empty([Some(text(&fields::TRACK)), context.track_name.clone()]);

    let total_entries = match total_entries {
        0 => resolve(record, &fields::TOTAL_ENTRIES)
            .and_then(value_to_count)
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
            .unwrap_or(0),
        n => n,
    };

    let lap_time_raw = text(&fields::LAP_TIME);
    let timing = parse_gap_and_lap(&lap_time_raw);

    CanonicalEntry {
        position,
        name,
        country: text(&fields::COUNTRY),
        rank: text(&fields::RANK),
        team: text(&fields::TEAM),
        difficulty: text(&fields::DIFFICULTY),
        car_class,
        car,
        track: normalize_track_name(&track),
        lap_time_raw,
        lap_time_millis: timing.lap_millis,
        gap_millis: timing.gap_millis,
        total_entries,
        track_id: resolve_id(record, &fields::TRACK_ID).or_else(|| context.track_id.clone()),
        class_id: resolve_id(record, &fields::CLASS_ID),
        date_time: resolve_id(record, &fields::DATE_TIME),
    }
}

/// Normalizes every record of one leaderboard.
pub fn normalize_all(records: &[Value], context: &NormalizeContext) -> Vec<CanonicalEntry> {
    let total = match context.total_entries {
        0 => saturating_u32(records.len()),
        n => n,
    };
    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize(record, context, index, total))
        .collect()
}

fn positive_integer(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 1.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u32::try_from(n).ok().filter(|n| *n > 0)
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_DURATION;
    use serde_json::json;

    #[test]
    fn test_flat_record() {
        let record = json!({
            "Position": 2,
            "Name": "Jane Doe",
            "Country": "Sweden",
            "CarClass": "GT3",
            "Car": "Audi R8 LMS",
            "LapTime": "1m 23.414s, +01.887s",
            "Difficulty": "Get Real",
            "Track": "Spa-Francorchamps - Grand Prix",
            "TotalEntries": "1,204",
            "date_time": "2024-05-01T10:00:00Z"
        });

        let entry = normalize(&record, &NormalizeContext::default(), 0, 0);
        assert_eq!(entry.position, 2);
        assert_eq!(entry.name, "Jane Doe");
        assert_eq!(entry.car_class, "GT3");
        assert_eq!(entry.car, "Audi R8 LMS");
        assert_eq!(entry.lap_time_millis, 83_414);
        assert_eq!(entry.gap_millis, 1_887);
        assert_eq!(entry.total_entries, 1_204);
        assert_eq!(entry.date_time.as_deref(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(entry.track_id, None);
    }

    #[test]
    fn test_nested_record() {
        let record = json!({
            "position": 7,
            "driver": { "Name": "Max Power" },
            "country": { "name": "Germany" },
            "rank": { "Name": "A" },
            "team": { "Name": null },
            "car_class": {
                "class": { "Name": "GTR 3", "Id": 1703 },
                "car": { "Name": "BMW M4 GT3" }
            },
            "laptime": "58.201s"
        });

        let entry = normalize(&record, &NormalizeContext::default(), 0, 0);
        assert_eq!(entry.position, 7);
        assert_eq!(entry.name, "Max Power");
        assert_eq!(entry.country, "Germany");
        assert_eq!(entry.rank, "A");
        assert_eq!(entry.team, "");
        assert_eq!(entry.car_class, "GTR 3");
        assert_eq!(entry.car, "BMW M4 GT3");
        assert_eq!(entry.class_id.as_deref(), Some("1703"));
        assert_eq!(entry.lap_time_millis, 58_201);
        assert_eq!(entry.gap_millis, 0);
    }

    #[test]
    fn test_position_falls_back_to_index() {
        let context = NormalizeContext::default();
        for bad in [json!(0), json!(-3), json!("first"), json!(1.5), json!(null)] {
            let entry = normalize(&json!({ "Position": bad }), &context, 4, 0);
            assert_eq!(entry.position, 5);
        }
        let entry = normalize(&json!({ "Pos": " 12 " }), &context, 0, 0);
        assert_eq!(entry.position, 12);
    }

    #[test]
    fn test_unknown_record_gets_defaults() {
        let entry = normalize(&json!({ "mystery": true }), &NormalizeContext::default(), 0, 0);
        assert_eq!(entry.position, 1);
        assert_eq!(entry.name, "Unknown");
        assert_eq!(entry.car_class, "");
        assert_eq!(entry.lap_time_millis, MAX_DURATION);
        assert_eq!(entry.gap_millis, MAX_DURATION);
        assert_eq!(entry.total_entries, 0);

        let entry = normalize(&json!("not an object"), &NormalizeContext::default(), 2, 0);
        assert_eq!(entry.position, 3);
        assert_eq!(entry.name, "Unknown");
    }

    #[test]
    fn test_class_and_car_fallbacks() {
        let context = NormalizeContext {
            first_class_name: Some("GT3".to_string()),
            default_class_name: Some("Header Class".to_string()),
            first_car_name: Some("Porsche 911 GT3 R".to_string()),
            ..NormalizeContext::default()
        };
        let entry = normalize(&json!({ "Name": "A" }), &context, 0, 0);
        assert_eq!(entry.car_class, "GT3");
        assert_eq!(entry.car, "Porsche 911 GT3 R");

        let context = NormalizeContext {
            default_class_name: Some("Header Class".to_string()),
            ..NormalizeContext::default()
        };
        let entry = normalize(&json!({ "Name": "A" }), &context, 0, 0);
        assert_eq!(entry.car_class, "Header Class");
        assert_eq!(entry.car, "");
    }

    #[test]
    fn test_context_from_document() {
        let records = vec![json!({
            "driver": { "Name": "A" },
            "car_class": { "class": { "Name": "GT3" }, "car": { "Name": "Audi" } }
        })];
        let document = json!({
            "track_info": {
                "Name": "Brands Hatch Grand Prix - Grand Prix",
                "Id": 9473,
                "ClassName": "GT3"
            },
            "leaderboard": records
        });

        let context = NormalizeContext::from_document(&document, &records);
        assert_eq!(context.track_id.as_deref(), Some("9473"));
        assert_eq!(context.first_class_name.as_deref(), Some("GT3"));
        assert_eq!(context.first_car_name.as_deref(), Some("Audi"));
        assert_eq!(context.total_entries, 1);

        let entries = normalize_all(&records, &context);
        assert_eq!(entries[0].track, "Brands Hatch - Grand Prix");
        assert_eq!(entries[0].track_id.as_deref(), Some("9473"));
        assert_eq!(entries[0].total_entries, 1);
    }

    #[test]
    fn test_explicit_total_overrides_record() {
        let record = json!({ "TotalEntries": 50 });
        let entry = normalize(&record, &NormalizeContext::default(), 0, 120);
        assert_eq!(entry.total_entries, 120);
    }

    #[test]
    fn test_track_name_from_document_fallback() {
        let document = json!({ "track_name": "Monza - Grand Prix" });
        let context = NormalizeContext::from_document(&document, &[]);
        assert_eq!(context.track_name.as_deref(), Some("Monza - Grand Prix"));
        assert_eq!(context.total_entries, 0);
    }
}

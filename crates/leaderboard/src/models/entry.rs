use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::MAX_DURATION;
use super::fields;
use crate::services::time_parser::split_lap_and_gap;

/// The normalized, schema-independent representation of one leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CanonicalEntry {
    /// 1-based position; falls back to the row index when the source has none.
    pub position: u32,
    pub name: String,
    pub country: String,
    pub rank: String,
    pub team: String,
    pub difficulty: String,
    pub car_class: String,
    pub car: String,
    pub track: String,
    /// Original display string, possibly with a `", +1.234s"` gap suffix.
    pub lap_time_raw: String,
    /// Parsed lap time, or [`MAX_DURATION`] when unparsable.
    pub lap_time_millis: u64,
    /// Parsed gap to the fastest entry, or [`MAX_DURATION`] when unparsable.
    pub gap_millis: u64,
    pub total_entries: u32,
    pub track_id: Option<String>,
    pub class_id: Option<String>,
    pub date_time: Option<String>,
}

impl Default for CanonicalEntry {
    fn default() -> Self {
        Self {
            position: 1,
            name: "Unknown".to_string(),
            country: String::new(),
            rank: String::new(),
            team: String::new(),
            difficulty: String::new(),
            car_class: String::new(),
            car: String::new(),
            track: String::new(),
            lap_time_raw: String::new(),
            lap_time_millis: MAX_DURATION,
            gap_millis: MAX_DURATION,
            total_entries: 0,
            track_id: None,
            class_id: None,
            date_time: None,
        }
    }
}

impl CanonicalEntry {
    pub fn has_valid_lap(&self) -> bool {
        self.lap_time_millis != MAX_DURATION
    }

    pub fn has_valid_gap(&self) -> bool {
        self.gap_millis != MAX_DURATION
    }

    /// The lap part of `lap_time_raw`, without any gap suffix.
    pub fn lap_time_display(&self) -> &str {
        split_lap_and_gap(&self.lap_time_raw).0
    }

    /// The gap part of `lap_time_raw`, if the row carries one.
    pub fn gap_display(&self) -> Option<&str> {
        split_lap_and_gap(&self.lap_time_raw).1
    }

    /// Looks up a value by canonical field id, as used by the column table.
    ///
    /// Unknown ids and synthetic columns yield `Value::Null`.
    pub fn field(&self, id: &str) -> Value {
        let text = |s: &str| Value::String(s.to_string());
        let optional = |s: &Option<String>| s.as_deref().map(text).unwrap_or(Value::Null);

        match id {
            "position" => Value::from(self.position),
            "name" => text(&self.name),
            "country" => text(&self.country),
            "rank" => text(&self.rank),
            "team" => text(&self.team),
            "difficulty" => text(&self.difficulty),
            "car_class" => text(&self.car_class),
            "car" => text(&self.car),
            "track" => text(&self.track),
            "lap_time" => text(&self.lap_time_raw),
            "total_entries" => Value::from(self.total_entries),
            "track_id" => optional(&self.track_id),
            "class_id" => optional(&self.class_id),
            "date_time" => optional(&self.date_time),
            _ => Value::Null,
        }
    }

    /// Canonical ids of every field that carries a value on this entry.
    ///
    /// Suitable as `sample_keys` for column projection.
    pub fn populated_keys(&self) -> Vec<&'static str> {
        [
            fields::POSITION,
            fields::NAME,
            fields::COUNTRY,
            fields::RANK,
            fields::TEAM,
            fields::DIFFICULTY,
            fields::CAR_CLASS,
            fields::CAR,
            fields::TRACK,
            fields::LAP_TIME,
            fields::TOTAL_ENTRIES,
            fields::TRACK_ID,
            fields::CLASS_ID,
            fields::DATE_TIME,
        ]
        .into_iter()
        .map(|alias| alias.field)
        .filter(|id| match self.field(id) {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CanonicalEntry {
        CanonicalEntry {
            position: 3,
            name: "Jane Doe".to_string(),
            car: "Audi R8 LMS".to_string(),
            lap_time_raw: "1m 23.414s, +01.887s".to_string(),
            lap_time_millis: 83_414,
            gap_millis: 1_887,
            total_entries: 120,
            date_time: Some("2024-05-01T10:00:00Z".to_string()),
            ..CanonicalEntry::default()
        }
    }

    #[test]
    fn test_lap_and_gap_display() {
        let entry = sample();
        assert_eq!(entry.lap_time_display(), "1m 23.414s");
        assert_eq!(entry.gap_display(), Some("+01.887s"));
    }

    #[test]
    fn test_field_lookup() {
        let entry = sample();
        assert_eq!(entry.field("position"), Value::from(3));
        assert_eq!(entry.field("car"), Value::from("Audi R8 LMS"));
        assert_eq!(entry.field("class_id"), Value::Null);
        assert_eq!(entry.field("gap_percent"), Value::Null);
    }

    #[test]
    fn test_every_sourced_alias_has_a_field() {
        let entry = CanonicalEntry {
            team: "Apex".to_string(),
            track_id: Some("1".to_string()),
            class_id: Some("2".to_string()),
            ..sample()
        };
        for alias in [
            fields::POSITION,
            fields::NAME,
            fields::CAR_CLASS,
            fields::CAR,
            fields::LAP_TIME,
            fields::TEAM,
            fields::TOTAL_ENTRIES,
            fields::TRACK_ID,
            fields::CLASS_ID,
            fields::DATE_TIME,
        ] {
            assert_ne!(entry.field(alias.field), Value::Null, "{}", alias.field);
        }
    }

    #[test]
    fn test_populated_keys_skip_empty_fields() {
        let keys = sample().populated_keys();
        assert!(keys.contains(&"car"));
        assert!(keys.contains(&"date_time"));
        assert!(!keys.contains(&"team"));
        assert!(!keys.contains(&"track_id"));
    }

    #[test]
    fn test_default_entry_sorts_last() {
        let entry = CanonicalEntry::default();
        assert!(!entry.has_valid_lap());
        assert!(!entry.has_valid_gap());
        assert_eq!(entry.name, "Unknown");
    }
}

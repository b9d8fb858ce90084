mod file;

pub use file::{DirectorySource, FileSource, discover_json_files, load_file};

use leaderboard::{
    CanonicalEntry, LeaderboardSummary, NormalizeContext, normalize_all,
    services::formatting::normalize_track_name,
};
use serde_json::Value;

use crate::Result;
use crate::extractors::extract_leaderboard;

/// One exported leaderboard, normalized and ready for ranking.
#[derive(Debug, Clone)]
pub struct LoadedLeaderboard {
    pub id: String,
    pub track: String,
    pub car_class: String,
    pub context: NormalizeContext,
    pub entries: Vec<CanonicalEntry>,
}

impl LoadedLeaderboard {
    /// Locates the record array in `document` and normalizes it.
    pub fn from_document(id: impl Into<String>, document: &Value) -> Result<Self> {
        let records = extract_leaderboard(document)?;
        let context = NormalizeContext::from_document(document, records);
        let entries = normalize_all(records, &context);

        let first = entries.first();
        let track = context
            .track_name
            .as_deref()
            .map(normalize_track_name)
            .or_else(|| first.map(|e| e.track.clone()))
            .unwrap_or_default();
        let car_class = context
            .default_class_name
            .clone()
            .or_else(|| first.map(|e| e.car_class.clone()))
            .unwrap_or_default();

        Ok(Self {
            id: id.into(),
            track,
            car_class,
            context,
            entries,
        })
    }

    pub fn summary(&self) -> LeaderboardSummary {
        LeaderboardSummary {
            id: self.id.clone(),
            track: self.track.clone(),
            car_class: self.car_class.clone(),
            entries: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImporterError;
    use serde_json::json;

    #[test]
    fn test_from_wrapped_document() {
        let document = json!({
            "track_info": { "Name": "Brands Hatch Indy - Indy", "Id": 1, "ClassName": "GT3" },
            "leaderboard": [
                { "driver": { "Name": "A" }, "laptime": "48.000s" },
                { "driver": { "Name": "B" }, "laptime": "48.500s, +0.500s" }
            ]
        });

        let loaded = LoadedLeaderboard::from_document("bh-indy", &document).unwrap();
        assert_eq!(loaded.track, "Brands Hatch - Indy");
        assert_eq!(loaded.car_class, "GT3");
        assert_eq!(loaded.entries.len(), 2);
        assert_eq!(loaded.entries[1].gap_millis, 500);
        assert_eq!(loaded.summary().entries, 2);
    }

    #[test]
    fn test_class_falls_back_to_first_entry() {
        let document = json!([{ "Name": "A", "CarClass": "GT4", "Track": "Monza" }]);
        let loaded = LoadedLeaderboard::from_document("monza", &document).unwrap();
        assert_eq!(loaded.car_class, "GT4");
        assert_eq!(loaded.track, "Monza");
    }

    #[test]
    fn test_unrecognized_document() {
        let result = LoadedLeaderboard::from_document("x", &json!({ "status": "ok" }));
        assert!(matches!(result, Err(ImporterError::SchemaNotFound)));
    }
}

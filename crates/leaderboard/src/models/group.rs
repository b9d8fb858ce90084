use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::CanonicalEntry;
use crate::services::ranking::{self, SortMode};

/// All leaderboard rows belonging to one competitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompetitorGroup {
    /// Normalized competitor key.
    pub key: String,
    pub entries: Vec<CanonicalEntry>,
}

impl CompetitorGroup {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: Vec::new(),
        }
    }

    /// Display name taken from the first entry, falling back to the key.
    pub fn display_name(&self) -> &str {
        self.entries
            .first()
            .map(|e| e.name.as_str())
            .unwrap_or(&self.key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lap time of the entry with the smallest gap in this group.
    pub fn reference_lap_millis(&self) -> Option<u64> {
        ranking::reference_lap_millis(&self.entries)
    }

    /// Re-sorts the entries in place; membership is unchanged.
    pub fn sort(&mut self, mode: SortMode) {
        ranking::sort(&mut self.entries, mode);
    }
}

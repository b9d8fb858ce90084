use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::grouping;
use crate::models::{CanonicalEntry, CompetitorGroup};

/// Difficulty filter value that matches every difficulty.
pub const ALL_DIFFICULTIES: &str = "All difficulties";

/// A competitor-name search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompetitorQuery {
    /// Case-insensitive substring match.
    Substring(String),
    /// Whole words, in order and adjacent. Written as a quoted term.
    Exact(Vec<String>),
}

impl CompetitorQuery {
    /// `"max"` searches for a substring, `"\"max\""` or `"'max'"` for the
    /// whole word.
    pub fn parse(term: &str) -> Self {
        let term = term.trim();
        let quoted = ['"', '\''].into_iter().find_map(|quote| {
            term.strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        });

        match quoted {
            Some(inner) if term.len() >= 2 => Self::Exact(words(inner)),
            _ => Self::Substring(term.to_lowercase()),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Substring(needle) => name.to_lowercase().contains(needle.as_str()),
            Self::Exact(phrase) if phrase.is_empty() => true,
            Self::Exact(phrase) => words(name)
                .windows(phrase.len())
                .any(|window| window == phrase.as_slice()),
        }
    }
}

fn words(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Per-entry criteria; each populated field must match exactly, ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EntryFilter {
    pub class_name: Option<String>,
    pub difficulty: Option<String>,
    pub car: Option<String>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &CanonicalEntry) -> bool {
        let difficulty = self
            .difficulty
            .as_deref()
            .filter(|d| !d.trim().eq_ignore_ascii_case(ALL_DIFFICULTIES));

        criterion(self.class_name.as_deref(), &entry.car_class)
            && criterion(difficulty, &entry.difficulty)
            && criterion(self.car.as_deref(), &entry.car)
    }

    pub fn is_empty(&self) -> bool {
        [&self.class_name, &self.difficulty, &self.car]
            .iter()
            .all(|c| c.as_deref().is_none_or(|s| s.trim().is_empty()))
    }
}

fn criterion(wanted: Option<&str>, actual: &str) -> bool {
    match wanted.map(str::trim) {
        None | Some("") => true,
        Some(wanted) => wanted.to_lowercase() == actual.trim().to_lowercase(),
    }
}

/// Competitor groups whose name matches `query`, holding only the entries
/// that pass `filter`. Groups left without entries are dropped.
pub fn search(
    entries: impl IntoIterator<Item = CanonicalEntry>,
    query: &CompetitorQuery,
    filter: &EntryFilter,
) -> Vec<CompetitorGroup> {
    let mut groups = grouping::group_by_competitor(entries);

    groups.retain_mut(|group| {
        if !query.matches(&group.key) {
            return false;
        }
        group.entries.retain(|entry| filter.matches(entry));
        !group.entries.is_empty()
    });

    groups
}

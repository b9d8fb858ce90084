use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::dates;
use crate::error::LeaderboardError;
use crate::models::{CanonicalEntry, MAX_DURATION};

/// Sort order for the rows of a leaderboard or competitor group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    /// Smallest gap to the leader first.
    #[default]
    Gap,
    /// Smallest lap time relative to the leader first.
    GapPercent,
    /// Source position, ascending.
    Position,
    /// Most recent first; rows without a date go last.
    Date,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [Self::Gap, Self::GapPercent, Self::Position, Self::Date];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gap => "gap",
            Self::GapPercent => "gapPercent",
            Self::Position => "position",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = LeaderboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LeaderboardError::UnknownSortMode(s.to_string()))
    }
}

/// Lap time as a percentage of the leader's lap; the leader is exactly 100.
///
/// The leader's lap is inferred from the entry itself as `lap - gap`. When
/// `reference_lap_millis` is given and disagrees with that inference the row
/// was measured against a different baseline; this is logged and the
/// inferred value is still used.
pub fn compute_gap_percent(entry: &CanonicalEntry, reference_lap_millis: Option<u64>) -> f64 {
    let lap = entry.lap_time_millis;
    let gap = entry.gap_millis;

    if gap == MAX_DURATION || lap == MAX_DURATION || lap == 0 || gap >= lap {
        return 100.0;
    }

    let reference = lap - gap;

    if let Some(expected) = reference_lap_millis
        && expected != MAX_DURATION
        && expected != reference
    {
        tracing::debug!(
            name = %entry.name,
            inferred = reference,
            expected,
            "Inconsistent gap baseline"
        );
    }

    (lap as f64 / reference as f64) * 100.0
}

/// Lap time of the entry with the smallest gap, found by linear scan.
pub fn reference_lap_millis(entries: &[CanonicalEntry]) -> Option<u64> {
    entries
        .iter()
        .min_by_key(|e| e.gap_millis)
        .map(|e| e.lap_time_millis)
        .filter(|lap| *lap != MAX_DURATION)
}

/// Stable in-place sort.
pub fn sort(entries: &mut [CanonicalEntry], mode: SortMode) {
    match mode {
        SortMode::Gap => entries.sort_by(|a, b| {
            a.gap_millis
                .cmp(&b.gap_millis)
                .then_with(|| by_entries_desc(a, b))
        }),
        SortMode::GapPercent => {
            let reference = reference_lap_millis(entries);
            entries.sort_by_cached_key(|e| {
                (
                    GapPercentKey(compute_gap_percent(e, reference)),
                    Reverse(e.total_entries),
                )
            })
        }
        SortMode::Position => entries.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| by_entries_desc(a, b))
        }),
        SortMode::Date => entries.sort_by_cached_key(|e| {
            Reverse(e.date_time.as_deref().and_then(dates::parse_timestamp))
        }),
    }
}

/// Orders gap percentages with `f64::total_cmp`.
struct GapPercentKey(f64);

impl PartialEq for GapPercentKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GapPercentKey {}

impl PartialOrd for GapPercentKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GapPercentKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn by_entries_desc(a: &CanonicalEntry, b: &CanonicalEntry) -> Ordering {
    b.total_entries.cmp(&a.total_entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, lap: u64, gap: u64) -> CanonicalEntry {
        CanonicalEntry {
            name: name.to_string(),
            lap_time_millis: lap,
            gap_millis: gap,
            ..CanonicalEntry::default()
        }
    }

    fn names(entries: &[CanonicalEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_sort_mode_wire_names() {
        assert_eq!("gapPercent".parse::<SortMode>().unwrap(), SortMode::GapPercent);
        assert_eq!("DATE".parse::<SortMode>().unwrap(), SortMode::Date);
        assert_eq!(SortMode::default(), SortMode::Gap);
        assert_eq!(
            serde_json::to_string(&SortMode::GapPercent).unwrap(),
            "\"gapPercent\""
        );
        assert!(matches!(
            "fastest".parse::<SortMode>(),
            Err(LeaderboardError::UnknownSortMode(_))
        ));
    }

    #[test]
    fn test_reference_entry_is_exactly_100() {
        let leader = entry("a", 83_414, 0);
        assert_eq!(compute_gap_percent(&leader, None), 100.0);
        assert_eq!(compute_gap_percent(&leader, Some(83_414)), 100.0);
    }

    #[test]
    fn test_gap_percent_is_relative_to_leader() {
        // leader at 100s, this row at 101s
        let row = entry("b", 101_000, 1_000);
        let percent = compute_gap_percent(&row, Some(100_000));
        assert!((percent - 101.0).abs() < 1e-9);
    }

    #[test]
    fn test_gap_percent_fallbacks() {
        assert_eq!(compute_gap_percent(&entry("x", 50_000, MAX_DURATION), None), 100.0);
        assert_eq!(compute_gap_percent(&entry("x", 0, 0), None), 100.0);
        assert_eq!(compute_gap_percent(&entry("x", 1_000, 1_000), None), 100.0);
        assert_eq!(compute_gap_percent(&entry("x", MAX_DURATION, 10), None), 100.0);
    }

    #[test]
    fn test_inconsistent_baseline_keeps_inferred_value() {
        let row = entry("c", 110_000, 10_000);
        let percent = compute_gap_percent(&row, Some(90_000));
        assert!((percent - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_reference_lap_uses_smallest_gap() {
        let entries = vec![
            entry("slow", 62_000, 2_000),
            entry("fast", 60_000, 0),
            entry("mid", 61_000, 1_000),
        ];
        assert_eq!(reference_lap_millis(&entries), Some(60_000));
        assert_eq!(reference_lap_millis(&[]), None);
    }

    #[test]
    fn test_sort_by_gap_puts_sentinel_last() {
        let mut entries = vec![
            entry("broken", MAX_DURATION, MAX_DURATION),
            entry("second", 61_000, 1_000),
            entry("first", 60_000, 0),
        ];
        sort(&mut entries, SortMode::Gap);
        assert_eq!(names(&entries), vec!["first", "second", "broken"]);
    }

    #[test]
    fn test_tie_break_prefers_larger_fields() {
        let mut small = entry("small", 60_000, 500);
        small.total_entries = 10;
        let mut large = entry("large", 60_000, 500);
        large.total_entries = 900;

        let mut entries = vec![small, large];
        sort(&mut entries, SortMode::Gap);
        assert_eq!(names(&entries), vec!["large", "small"]);
    }

    #[test]
    fn test_sort_by_gap_percent() {
        let mut entries = vec![
            entry("ten", 110_000, 10_000),
            entry("one", 101_000, 1_000),
            entry("lead", 100_000, 0),
        ];
        sort(&mut entries, SortMode::GapPercent);
        assert_eq!(names(&entries), vec!["lead", "one", "ten"]);
    }

    #[test]
    fn test_gap_percent_sort_ties_and_stability() {
        let mut small = entry("small", 101_000, 1_000);
        small.total_entries = 10;
        let mut large = entry("large", 202_000, 2_000);
        large.total_entries = 900;
        let mut first = entry("first", 150_000, MAX_DURATION);
        first.total_entries = 5;
        let mut second = entry("second", 0, 0);
        second.total_entries = 5;

        let mut entries = vec![first, small, second, large];
        sort(&mut entries, SortMode::GapPercent);
        assert_eq!(names(&entries), vec!["first", "second", "large", "small"]);
    }

    #[test]
    fn test_sort_by_position_is_idempotent() {
        let mut entries: Vec<_> = [3, 1, 2, 1]
            .into_iter()
            .enumerate()
            .map(|(i, position)| CanonicalEntry {
                position,
                name: i.to_string(),
                ..CanonicalEntry::default()
            })
            .collect();

        sort(&mut entries, SortMode::Position);
        let once = entries.clone();
        sort(&mut entries, SortMode::Position);
        assert_eq!(entries, once);
        assert_eq!(names(&entries), vec!["1", "3", "2", "0"]);
    }

    #[test]
    fn test_sort_by_date_most_recent_first() {
        let dated = |name: &str, date: Option<&str>| CanonicalEntry {
            name: name.to_string(),
            date_time: date.map(str::to_string),
            ..CanonicalEntry::default()
        };
        let mut entries = vec![
            dated("missing", None),
            dated("old", Some("2023-01-05T10:00:00Z")),
            dated("garbage", Some("soon")),
            dated("new", Some("2024-06-01")),
        ];
        sort(&mut entries, SortMode::Date);
        assert_eq!(names(&entries), vec!["new", "old", "missing", "garbage"]);
    }
}

use std::collections::HashMap;

use crate::models::{CanonicalEntry, CompetitorGroup, CompetitorKey};
use crate::services::ranking::SortMode;

/// Groups entries by `key_fn`, keeping groups in first-seen key order and
/// entries in input order within each group.
pub fn group_by<F>(
    entries: impl IntoIterator<Item = CanonicalEntry>,
    key_fn: F,
) -> Vec<CompetitorGroup>
where
    F: Fn(&CanonicalEntry) -> String,
{
    let mut groups: Vec<CompetitorGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let key = key_fn(&entry);
        let slot = *index.entry(key).or_insert_with_key(|key| {
            groups.push(CompetitorGroup::new(key.clone()));
            groups.len() - 1
        });
        groups[slot].entries.push(entry);
    }

    groups
}

/// Groups entries by case-normalized competitor name.
pub fn group_by_competitor(
    entries: impl IntoIterator<Item = CanonicalEntry>,
) -> Vec<CompetitorGroup> {
    group_by(entries, |entry| CompetitorKey::new(&entry.name).into_string())
}

/// Sorts the entries of every group; group order is left alone.
pub fn sort_groups(groups: &mut [CompetitorGroup], mode: SortMode) {
    for group in groups.iter_mut() {
        group.sort(mode);
    }
}

/// Zero-based position of the first group whose key matches `name`.
pub fn find_group(groups: &[CompetitorGroup], name: &str) -> Option<usize> {
    let key = CompetitorKey::new(name);
    groups.iter().position(|g| g.key == key.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, track: &str, gap: u64) -> CanonicalEntry {
        CanonicalEntry {
            name: name.to_string(),
            track: track.to_string(),
            lap_time_millis: 60_000 + gap,
            gap_millis: gap,
            ..CanonicalEntry::default()
        }
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let groups = group_by_competitor(vec![
            entry("Bob", "Spa", 10),
            entry("Alice", "Spa", 0),
            entry("bob", "Monza", 0),
            entry(" BOB ", "Imola", 5),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "bob");
        assert_eq!(groups[0].display_name(), "Bob");
        assert_eq!(groups[1].key, "alice");

        let tracks: Vec<_> = groups[0].entries.iter().map(|e| e.track.as_str()).collect();
        assert_eq!(tracks, vec!["Spa", "Monza", "Imola"]);
    }

    #[test]
    fn test_grouping_does_not_sort() {
        let groups = group_by_competitor(vec![entry("A", "slow", 900), entry("A", "fast", 0)]);
        assert_eq!(groups[0].entries[0].track, "slow");
    }

    #[test]
    fn test_sort_groups_sorts_within_groups() {
        let mut groups = group_by_competitor(vec![
            entry("A", "slow", 900),
            entry("B", "only", 0),
            entry("A", "fast", 0),
        ]);
        sort_groups(&mut groups, SortMode::Gap);

        assert_eq!(groups[0].key, "a");
        assert_eq!(groups[0].entries[0].track, "fast");
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].len(), 1);
    }

    #[test]
    fn test_custom_key() {
        let groups = group_by(
            vec![entry("A", "Spa", 0), entry("B", "Spa", 0), entry("C", "Monza", 0)],
            |e| e.track.clone(),
        );
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Spa", "Monza"]);
    }

    #[test]
    fn test_find_group() {
        let groups =
            group_by_competitor(vec![entry("Alice", "Spa", 0), entry("Jane Doe", "Spa", 0)]);
        assert_eq!(find_group(&groups, "jane   DOE"), Some(1));
        assert_eq!(find_group(&groups, "nobody"), None);
    }
}

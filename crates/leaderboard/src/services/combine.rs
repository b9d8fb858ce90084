use crate::models::{CanonicalEntry, MAX_DURATION};

/// Merges several class leaderboards of one track into a single ranking.
///
/// Entries are ordered by lap time (stable, unparsable laps last), positions
/// are reassigned from 1, and every gap is recomputed against the overall
/// fastest lap. `lap_time_raw` is rewritten to match the new gap.
pub fn combine<I, S>(sets: I) -> Vec<CanonicalEntry>
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = CanonicalEntry>,
{
    let mut entries: Vec<CanonicalEntry> = sets.into_iter().flatten().collect();
    entries.sort_by_key(|e| e.lap_time_millis);

    let fastest = entries
        .first()
        .map(|e| e.lap_time_millis)
        .unwrap_or(MAX_DURATION);
    let total = u32::try_from(entries.len()).unwrap_or(u32::MAX);

    for (index, entry) in entries.iter_mut().enumerate() {
        let lap = entry.lap_time_display().to_string();

        entry.position = u32::try_from(index + 1).unwrap_or(u32::MAX);
        entry.total_entries = total;

        if !entry.has_valid_lap() || fastest == MAX_DURATION {
            entry.gap_millis = MAX_DURATION;
            entry.lap_time_raw = lap;
        } else if index == 0 {
            entry.gap_millis = 0;
            entry.lap_time_raw = lap;
        } else {
            let gap = entry.lap_time_millis - fastest;
            entry.gap_millis = gap;
            entry.lap_time_raw = format!("{lap}, {}", format_gap(gap));
        }
    }

    entries
}

/// `1887` → `"+1.887s"`.
pub fn format_gap(gap_millis: u64) -> String {
    format!("+{}.{:03}s", gap_millis / 1000, gap_millis % 1000)
}

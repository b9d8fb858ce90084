use serde_json::Value;

use super::dates;
use super::resolver::value_to_text;
use crate::models::CanonicalEntry;

/// Placeholder for empty cells.
pub const EMPTY_CELL: &str = "—";

/// Placeholder for a gap percentage that does not apply.
pub const NO_GAP_PERCENT: &str = "-";

/// `"1m 23.414s"` → `"1:23:414s"`, `"45.281s"` → `"45:281s"`.
///
/// A leading `+` or `-` is kept. Input that is not a lap time is returned
/// unchanged.
pub fn format_classic_lap_time(raw: &str) -> String {
    classic_parts(raw.trim())
        .map(|(sign, minutes, seconds, millis)| match minutes {
            0 => format!("{sign}{seconds}:{millis}s"),
            _ => format!("{sign}{minutes}:{seconds:02}:{millis}s"),
        })
        .unwrap_or_else(|| raw.to_string())
}

fn classic_parts(s: &str) -> Option<(&str, u64, u64, String)> {
    let (sign, rest) = match s.chars().next() {
        Some(c @ ('+' | '-')) => (&s[..c.len_utf8()], &s[c.len_utf8()..]),
        _ => ("", s),
    };
    let rest = rest.strip_suffix('s')?;

    let (minutes, rest) = match rest.split_once('m') {
        Some((minutes, rest)) => (number(minutes)?, rest.trim_start()),
        None => (0, rest),
    };

    let (seconds, millis) = match rest.split_once('.') {
        Some((seconds, millis)) => (seconds, millis),
        None => (rest, ""),
    };
    if millis.len() > 3 || !millis.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some((sign, minutes, number(seconds)?, format!("{millis:0<3}")))
}

fn number(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// `"101.0%"`, or `"-"` for the reference entry and the 100% fallback.
pub fn format_gap_percent(percent: f64, is_reference: bool) -> String {
    if is_reference || !percent.is_finite() || (percent - 100.0).abs() < f64::EPSILON {
        return NO_GAP_PERCENT.to_string();
    }
    format!("{percent:.1}%")
}

/// Title-cases a raw field name: `"bestSector"` → `"Best Sector"`.
pub fn format_header(key: &str) -> String {
    match key {
        "class_name" | "className" | "ClassName" => return "Car class".to_string(),
        _ => {}
    }
    let lower = key.to_ascii_lowercase();
    if matches!(
        lower.as_str(),
        "entry_count" | "total_entries" | "totalracers" | "total_racers"
    ) {
        return "Entries".to_string();
    }

    let mut spaced = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        match c {
            '_' => spaced.push(' '),
            c if c.is_uppercase() => {
                spaced.push(' ');
                spaced.push(c);
            }
            c => spaced.push(c),
        }
    }

    let trimmed = spaced.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Star count for a driver rank letter: D → 1 up to A → 4, 0 if unknown.
pub fn rank_stars(rank: &str) -> usize {
    match rank.trim().to_ascii_uppercase().as_str() {
        "D" => 1,
        "C" => 2,
        "B" => 3,
        "A" => 4,
        _ => 0,
    }
}

/// Badge colour for a finishing position, green for first through red for last.
pub fn position_badge_color(position: u32, total: u32) -> String {
    if total <= 1 || position == 0 {
        return "rgba(59,130,246,0.18)".to_string();
    }
    if position == 1 {
        return "#22c55e".to_string();
    }
    if position >= total {
        return "#ef4444".to_string();
    }

    let t = f64::from(position - 1) / f64::from(total - 1);
    let channel = |from: f64, to: f64| (from + (to - from) * t).round() as u8;
    format!(
        "rgb({},{},{})",
        channel(34.0, 239.0),
        channel(197.0, 68.0),
        channel(94.0, 68.0)
    )
}

const TRACK_NAME_FIXES: &[(&str, &str)] = &[
    ("brands hatch grand prix - grand prix", "Brands Hatch - Grand Prix"),
    ("brands hatch grand - grand prix", "Brands Hatch - Grand Prix"),
    ("brands hatch indy - indy", "Brands Hatch - Indy"),
];

/// Rewrites known inconsistent track spellings.
pub fn normalize_track_name(name: &str) -> String {
    let collapsed = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    TRACK_NAME_FIXES
        .iter()
        .find(|(from, _)| *from == collapsed)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// `"Donington Park - Grand Prix"` → `("Donington Park", Some("Grand Prix"))`.
pub fn split_track_layout(name: &str) -> (String, Option<String>) {
    let mut parts: Vec<&str> = Vec::new();
    let mut start = 0;
    let chars: Vec<(usize, char)> = name.char_indices().collect();

    for (i, &(offset, c)) in chars.iter().enumerate() {
        let is_dash = matches!(c, '-' | '–' | '—');
        let spaced = i > 0
            && chars[i - 1].1.is_whitespace()
            && chars.get(i + 1).is_some_and(|(_, next)| next.is_whitespace());
        if is_dash && spaced {
            parts.push(name[start..offset].trim());
            start = offset + c.len_utf8();
        }
    }
    parts.push(name[start..].trim());
    parts.retain(|p| !p.is_empty());

    match parts.split_first() {
        Some((track, layout)) if !layout.is_empty() => {
            (track.to_string(), Some(layout.join(" - ")))
        }
        _ => (name.trim().to_string(), None),
    }
}

pub fn format_position_cell(value: &Value, entry: &CanonicalEntry) -> String {
    let position = value_to_text(value).unwrap_or_else(|| entry.position.to_string());
    match entry.total_entries {
        0 => position,
        total => format!("{position} / {total}"),
    }
}

pub fn format_lap_time_cell(_value: &Value, entry: &CanonicalEntry) -> String {
    let lap = entry.lap_time_display();
    if lap.is_empty() {
        return EMPTY_CELL.to_string();
    }
    let lap = format_classic_lap_time(lap);
    match entry.gap_display().filter(|gap| !gap.is_empty()) {
        Some(gap) => format!("{lap} {}", format_classic_lap_time(gap)),
        None => lap,
    }
}

pub fn format_gap_percent_cell(value: &Value, entry: &CanonicalEntry) -> String {
    let is_reference = entry.gap_display().is_none() || entry.gap_millis == 0;
    match value.as_f64() {
        Some(percent) => format_gap_percent(percent, is_reference),
        None => NO_GAP_PERCENT.to_string(),
    }
}

pub fn format_date_cell(value: &Value, _entry: &CanonicalEntry) -> String {
    value
        .as_str()
        .and_then(dates::format_date)
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

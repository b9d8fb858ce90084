use crate::models::MAX_DURATION;

/// Parsed primary lap time and gap to the group's fastest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LapAndGap {
    pub lap_millis: u64,
    pub gap_millis: u64,
}

/// Parses a duration string into milliseconds.
///
/// Accepts `"1m 23.414s"`, `"58.201s"`, `"1:23.456"` and `"1:23:456s"`, with
/// an optional leading `+` and an optional trailing `s`. Fraction digits past
/// the third are dropped. Callers map `None` to [`MAX_DURATION`].
pub fn parse_duration(raw: &str) -> Option<u64> {
    let s = raw.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    let s = s
        .strip_suffix('s')
        .or_else(|| s.strip_suffix('S'))
        .unwrap_or(s)
        .trim_end();

    if let Some((minutes, rest)) = s.split_once('m') {
        return with_minutes(digits(minutes.trim())?, parse_seconds(rest.trim())?);
    }

    let parts: Vec<&str> = s.split(':').collect();
    match parts.as_slice() {
        [seconds] => parse_seconds(seconds),
        [minutes, seconds] => with_minutes(digits(minutes)?, parse_seconds(seconds)?),
        [minutes, seconds, millis] => {
            let seconds = digits(seconds)?.checked_mul(1000)?;
            with_minutes(digits(minutes)?, seconds.checked_add(fraction_millis(millis)?)?)
        }
        _ => None,
    }
}

/// [`parse_duration`], with failures mapped to [`MAX_DURATION`].
pub fn parse_duration_or_sentinel(raw: &str) -> u64 {
    parse_duration(raw).unwrap_or(MAX_DURATION)
}

/// Splits `"1m 23.414s, +01.887s"` into the lap part and the optional gap
/// part, on the first comma.
pub fn split_lap_and_gap(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once(',') {
        Some((lap, gap)) => (lap.trim(), Some(gap.trim())),
        None => (raw.trim(), None),
    }
}

/// Parses a lap-time display string with an optional gap suffix.
///
/// Without a gap suffix the row is the reference and its gap is 0, unless
/// its own lap time is unparsable: such a row cannot be the reference and
/// both values become [`MAX_DURATION`].
pub fn parse_gap_and_lap(raw: &str) -> LapAndGap {
    let (lap, gap) = split_lap_and_gap(raw);
    let lap_millis = parse_duration(lap);

    let gap_millis = match (gap, lap_millis) {
        (Some(gap), _) => parse_duration_or_sentinel(gap),
        (None, Some(_)) => 0,
        (None, None) => MAX_DURATION,
    };

    LapAndGap {
        lap_millis: lap_millis.unwrap_or(MAX_DURATION),
        gap_millis,
    }
}

fn with_minutes(minutes: u64, millis: u64) -> Option<u64> {
    minutes.checked_mul(60_000)?.checked_add(millis)
}

/// `"23.414"` → 23414, `"23"` → 23000.
fn parse_seconds(s: &str) -> Option<u64> {
    let (seconds, fraction) = match s.split_once('.') {
        Some((seconds, fraction)) => (seconds, fraction_millis(fraction)?),
        None => (s, 0),
    };
    digits(seconds)?.checked_mul(1000)?.checked_add(fraction)
}

/// Reads up to three fraction digits as milliseconds, right-padding with zeros.
fn fraction_millis(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let padded: String = s.chars().chain("000".chars()).take(3).collect();
    padded.parse().ok()
}

fn digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

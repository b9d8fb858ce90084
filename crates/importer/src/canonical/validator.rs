use std::collections::HashMap;

use leaderboard::CanonicalEntry;
use tracing::warn;

use crate::{ImporterError, Result};

pub struct LeaderboardValidator;

impl LeaderboardValidator {
    /// Checks normalized entries for data problems.
    ///
    /// Only an empty leaderboard is an error; everything else is reported as
    /// a warning since the entries still rank and render.
    pub fn validate(entries: &[CanonicalEntry]) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        if entries.is_empty() {
            report
                .errors
                .push("Leaderboard has no entries".to_string());
        }

        let mut positions: HashMap<u32, usize> = HashMap::new();
        let mut missing_dates = 0;

        for (idx, entry) in entries.iter().enumerate() {
            let label = format!("{}. {}", idx + 1, entry.name);

            if entry.name == "Unknown" {
                report
                    .warnings
                    .push(format!("Entry {} has no driver name", idx + 1));
            }

            if !entry.has_valid_lap() {
                if entry.lap_time_raw.is_empty() {
                    report
                        .warnings
                        .push(format!("Entry '{}' has no lap time", label));
                } else {
                    report.warnings.push(format!(
                        "Entry '{}' has unparsable lap time '{}'",
                        label, entry.lap_time_raw
                    ));
                }
            } else if !entry.has_valid_gap() {
                report.warnings.push(format!(
                    "Entry '{}' has unparsable gap in '{}'",
                    label, entry.lap_time_raw
                ));
            }

            *positions.entry(entry.position).or_default() += 1;

            if entry.date_time.is_none() {
                missing_dates += 1;
            }
        }

        let mut duplicates: Vec<_> = positions
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .collect();
        duplicates.sort_unstable();
        for (position, count) in duplicates {
            report
                .warnings
                .push(format!("Position {} appears {} times", position, count));
        }

        if missing_dates > 0 {
            report.warnings.push(format!(
                "{} of {} entries have no date",
                missing_dates,
                entries.len()
            ));
        }

        if !report.errors.is_empty() {
            Err(ImporterError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}

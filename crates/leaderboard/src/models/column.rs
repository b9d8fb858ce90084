use serde_json::Value;

use super::CanonicalEntry;
use super::fields::{self, FieldAlias};
use crate::services::formatting;
use crate::services::projection;
use crate::services::ranking::SortMode;

/// Renders one cell: receives the cell value and the full row.
pub type CellFormatter = fn(&Value, &CanonicalEntry) -> String;

#[derive(Debug, Clone, Copy)]
pub struct ColumnDescriptor {
    pub id: &'static str,
    pub aliases: FieldAlias,
    pub display_name: &'static str,
    /// Lower comes first.
    pub order: i32,
    pub visible: bool,
    pub sortable: bool,
    pub sort_key: Option<SortMode>,
    /// Computed from other fields rather than read from the source data.
    pub synthetic: bool,
    pub format: Option<CellFormatter>,
}

impl ColumnDescriptor {
    const fn hidden(aliases: FieldAlias, display_name: &'static str, order: i32) -> Self {
        Self {
            id: aliases.field,
            aliases,
            display_name,
            order,
            visible: false,
            sortable: false,
            sort_key: None,
            synthetic: false,
            format: None,
        }
    }

    const fn shown(aliases: FieldAlias, display_name: &'static str, order: i32) -> Self {
        Self {
            visible: true,
            ..Self::hidden(aliases, display_name, order)
        }
    }

    const fn sorted_by(self, mode: SortMode) -> Self {
        Self {
            sortable: true,
            sort_key: Some(mode),
            ..self
        }
    }

    const fn formatted(self, format: CellFormatter) -> Self {
        Self {
            format: Some(format),
            ..self
        }
    }

    pub fn matches(&self, key: &str) -> bool {
        self.id == key || self.aliases.matches(key)
    }
}

const STANDARD_COLUMNS: &[ColumnDescriptor] = &[
    ColumnDescriptor::shown(fields::CAR_CLASS, "Car class", 10),
    ColumnDescriptor::shown(fields::CAR, "Car", 20),
    ColumnDescriptor::shown(fields::TRACK, "Track", 30),
    ColumnDescriptor::hidden(fields::TOTAL_ENTRIES, "Entries", 35),
    ColumnDescriptor::shown(fields::POSITION, "Position", 40)
        .sorted_by(SortMode::Position)
        .formatted(formatting::format_position_cell),
    ColumnDescriptor::shown(fields::LAP_TIME, "Laptime", 50)
        .sorted_by(SortMode::Gap)
        .formatted(formatting::format_lap_time_cell),
    ColumnDescriptor {
        synthetic: true,
        ..ColumnDescriptor::shown(fields::GAP_PERCENT, "Lap %", 60)
            .sorted_by(SortMode::GapPercent)
            .formatted(formatting::format_gap_percent_cell)
    },
    ColumnDescriptor::shown(fields::DIFFICULTY, "Difficulty", 70),
    ColumnDescriptor::shown(fields::DATE_TIME, "Date", 80)
        .sorted_by(SortMode::Date)
        .formatted(formatting::format_date_cell),
    // Shown in the competitor header rather than as columns.
    ColumnDescriptor::hidden(fields::NAME, "Name", 0),
    ColumnDescriptor::hidden(fields::COUNTRY, "Country", 0),
    ColumnDescriptor::hidden(fields::RANK, "Rank", 0),
    ColumnDescriptor::hidden(fields::TEAM, "Team", 0),
    ColumnDescriptor::hidden(fields::TRACK_ID, "Track ID", 0),
    ColumnDescriptor::hidden(fields::CLASS_ID, "Class ID", 0),
    ColumnDescriptor::hidden(fields::TIME_DIFF, "Time Diff", 0),
    ColumnDescriptor::hidden(fields::FOUND, "Found", 0),
];

/// An immutable set of column descriptors.
#[derive(Debug, Clone)]
pub struct ColumnSet {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnSet {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    /// The leaderboard table layout.
    ///
    /// Descriptors match sample keys through the aliases in [`super::fields`].
    pub fn standard() -> Self {
        Self::new(STANDARD_COLUMNS.to_vec())
    }

    pub fn descriptors(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn get(&self, id: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// First descriptor whose id or aliases match `key`.
    pub fn by_key(&self, key: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.matches(key))
    }

    pub fn display_name(&self, key: &str) -> String {
        match self.by_key(key) {
            Some(column) => column.display_name.to_string(),
            None => formatting::format_header(key),
        }
    }

    pub fn sort_mode_for(&self, key: &str) -> Option<SortMode> {
        self.by_key(key)
            .filter(|c| c.sortable)
            .map(|c| c.sort_key.unwrap_or_default())
    }

    /// Every raw field name that belongs to a hidden column.
    pub fn hidden_aliases(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| !c.visible)
            .flat_map(|c| c.aliases.keys.iter().copied())
            .collect()
    }

    /// Ordered visible columns for a dataset with the given keys.
    pub fn project<K: AsRef<str>>(&self, sample_keys: &[K]) -> Vec<&ColumnDescriptor> {
        projection::project(sample_keys, &self.columns)
    }
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_alias() {
        let columns = ColumnSet::standard();
        assert_eq!(columns.by_key("Lap Time").map(|c| c.id), Some("lap_time"));
        assert_eq!(columns.by_key("ClassName").map(|c| c.id), Some("car_class"));
        assert!(columns.by_key("unknown_field").is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_title_case() {
        let columns = ColumnSet::standard();
        assert_eq!(columns.display_name("GapPercent"), "Lap %");
        assert_eq!(columns.display_name("bestSector"), "Best Sector");
    }

    #[test]
    fn test_sort_mode_for_sortable_columns() {
        let columns = ColumnSet::standard();
        assert_eq!(columns.sort_mode_for("LapTime"), Some(SortMode::Gap));
        assert_eq!(columns.sort_mode_for("Pos"), Some(SortMode::Position));
        assert_eq!(columns.sort_mode_for("Date"), Some(SortMode::Date));
        assert_eq!(columns.sort_mode_for("Car"), None);
    }

    #[test]
    fn test_hidden_aliases() {
        let hidden = ColumnSet::standard().hidden_aliases();
        assert!(hidden.contains(&"DriverName"));
        assert!(hidden.contains(&"Track ID"));
        assert!(!hidden.contains(&"LapTime"));
    }

    #[test]
    fn test_gap_percent_is_the_only_synthetic_column() {
        let columns = ColumnSet::standard();
        let synthetic: Vec<_> = columns
            .descriptors()
            .iter()
            .filter(|c| c.synthetic)
            .map(|c| c.id)
            .collect();
        assert_eq!(synthetic, vec!["gap_percent"]);
    }
}

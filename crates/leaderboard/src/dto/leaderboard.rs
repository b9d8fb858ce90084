use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common::{Page, PageWindow, PaginationParams};
use crate::error::Result;
use crate::models::{
    CanonicalEntry, ColumnDescriptor, ColumnSet, CompetitorGroup, CompetitorKey,
};
use crate::services::ranking::{self, SortMode};
use crate::services::search::{CompetitorQuery, EntryFilter};
use crate::services::{grouping, pagination, projection};

/// Buttons shown around the current page.
pub const PAGE_WINDOW_BUTTONS: usize = 5;

fn parse_sort(sort: Option<&str>) -> Result<SortMode> {
    match sort.map(str::trim).filter(|s| !s.is_empty()) {
        Some(sort) => sort.parse(),
        None => Ok(SortMode::default()),
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    /// 1-based page; when absent and `driver` is set, the page holding that driver.
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    /// One of `gap`, `gapPercent`, `position`, `date`.
    pub sort: Option<String>,
    pub driver: Option<String>,
}

impl LeaderboardQuery {
    pub fn sort_mode(&self) -> Result<SortMode> {
        parse_sort(self.sort.as_deref())
    }

    pub fn pagination(&self, default_page_size: usize) -> PaginationParams {
        PaginationParams::new(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(default_page_size),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DriverQuery {
    /// Substring, or a quoted whole-word phrase.
    #[serde(default)]
    pub name: String,
    pub class: Option<String>,
    pub difficulty: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub sort: Option<String>,
}

impl DriverQuery {
    pub fn sort_mode(&self) -> Result<SortMode> {
        parse_sort(self.sort.as_deref())
    }

    pub fn pagination(&self, default_page_size: usize) -> PaginationParams {
        PaginationParams::new(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(default_page_size),
        )
    }

    pub fn query(&self) -> CompetitorQuery {
        CompetitorQuery::parse(&self.name)
    }

    pub fn filter(&self) -> EntryFilter {
        EntryFilter {
            class_name: self.class.clone(),
            difficulty: self.difficulty.clone(),
            car: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ColumnView {
    pub id: String,
    pub display_name: String,
    pub order: i32,
    pub sortable: bool,
    pub sort_key: Option<SortMode>,
    pub synthetic: bool,
}

impl From<&ColumnDescriptor> for ColumnView {
    fn from(column: &ColumnDescriptor) -> Self {
        Self {
            id: column.id.to_string(),
            display_name: column.display_name.to_string(),
            order: column.order,
            sortable: column.sortable,
            sort_key: column.sort_key,
            synthetic: column.synthetic,
        }
    }
}

/// A leaderboard row with its derived gap percentage and display cells.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EntryView {
    #[serde(flatten)]
    pub entry: CanonicalEntry,
    pub gap_percent: f64,
    /// Formatted cells, one per projected column.
    pub cells: Vec<String>,
}

impl EntryView {
    pub fn new(entry: CanonicalEntry, columns: &[&ColumnDescriptor]) -> Self {
        let cells = columns
            .iter()
            .map(|column| projection::format_cell(column, &entry))
            .collect();
        Self {
            gap_percent: ranking::compute_gap_percent(&entry, None),
            entry,
            cells,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardSummary {
    pub id: String,
    pub track: String,
    pub car_class: String,
    pub entries: usize,
}

/// How to slice and order a leaderboard for display.
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions<'a> {
    pub sort: SortMode,
    /// Requested page; `None` follows `driver`, then page 1.
    pub page: Option<usize>,
    pub page_size: usize,
    pub driver: Option<&'a str>,
}

impl ViewOptions<'_> {
    fn page_for(&self, driver_index: impl FnOnce(&str) -> Option<usize>) -> usize {
        match (self.page, self.driver) {
            (Some(page), _) => page,
            (None, Some(driver)) => driver_index(driver)
                .map(|index| pagination::find_page_for_index(index, self.page_size))
                .unwrap_or(1),
            (None, None) => 1,
        }
    }
}

/// Union of the populated field ids of `entries`, in first-seen order.
pub fn sample_keys<'a>(
    entries: impl IntoIterator<Item = &'a CanonicalEntry>,
) -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = Vec::new();
    for entry in entries {
        for key in entry.populated_keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardView {
    pub id: String,
    pub track: String,
    pub car_class: String,
    pub sort: SortMode,
    pub columns: Vec<ColumnView>,
    pub page: Page<EntryView>,
    pub page_window: PageWindow,
}

impl LeaderboardView {
    /// Sorts, projects and paginates one leaderboard.
    pub fn build(
        summary: LeaderboardSummary,
        mut entries: Vec<CanonicalEntry>,
        columns: &ColumnSet,
        options: ViewOptions<'_>,
    ) -> Self {
        ranking::sort(&mut entries, options.sort);

        let keys = sample_keys(&entries);
        let projected = columns.project(&keys);

        let index = options.page_for(|driver| {
            let key = CompetitorKey::new(driver);
            entries
                .iter()
                .position(|e| CompetitorKey::new(&e.name) == key)
        });
        let page = pagination::paginate(&entries, index, options.page_size)
            .map(|entry| EntryView::new(entry, &projected));
        let page_window =
            pagination::page_window(page.index, page.total_pages, PAGE_WINDOW_BUTTONS);

        Self {
            id: summary.id,
            track: summary.track,
            car_class: summary.car_class,
            sort: options.sort,
            columns: projected.iter().map(|c| ColumnView::from(*c)).collect(),
            page,
            page_window,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupView {
    pub key: String,
    pub name: String,
    pub entries: Vec<EntryView>,
}

impl GroupView {
    pub fn new(group: CompetitorGroup, columns: &[&ColumnDescriptor]) -> Self {
        Self {
            name: group.display_name().to_string(),
            entries: group
                .entries
                .into_iter()
                .map(|entry| EntryView::new(entry, columns))
                .collect(),
            key: group.key,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupsView {
    pub sort: SortMode,
    pub columns: Vec<ColumnView>,
    pub page: Page<GroupView>,
    pub page_window: PageWindow,
}

impl GroupsView {
    /// Sorts each group's entries and paginates over groups.
    pub fn build(
        mut groups: Vec<CompetitorGroup>,
        columns: &ColumnSet,
        options: ViewOptions<'_>,
    ) -> Self {
        grouping::sort_groups(&mut groups, options.sort);

        let keys = sample_keys(groups.iter().flat_map(|g| g.entries.iter()));
        let projected = columns.project(&keys);

        let index = options.page_for(|driver| grouping::find_group(&groups, driver));
        let page = pagination::paginate(&groups, index, options.page_size)
            .map(|group| GroupView::new(group, &projected));
        let page_window =
            pagination::page_window(page.index, page.total_pages, PAGE_WINDOW_BUTTONS);

        Self {
            sort: options.sort,
            columns: projected.iter().map(|c| ColumnView::from(*c)).collect(),
            page,
            page_window,
        }
    }
}

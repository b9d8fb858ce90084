use crate::models::ColumnSet;

/// Page size of the reference deployment.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Explicit configuration handed to the leaderboard components.
#[derive(Debug, Clone)]
pub struct LeaderboardConfig {
    pub columns: ColumnSet,
    pub page_size: usize,
}

impl LeaderboardConfig {
    pub fn new(columns: ColumnSet, page_size: usize) -> Self {
        Self {
            columns,
            page_size: page_size.max(1),
        }
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        Self::new(self.columns, page_size)
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self::new(ColumnSet::standard(), DEFAULT_PAGE_SIZE)
    }
}

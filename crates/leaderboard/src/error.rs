use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("Unknown sort mode: '{0}'. Expected one of: gap, gapPercent, position, date")]
    UnknownSortMode(String),

    #[error("Invalid page size: {0}. Page size must be greater than zero")]
    InvalidPageSize(usize),

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),
}

pub type Result<T> = std::result::Result<T, LeaderboardError>;

pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;

pub use config::LeaderboardConfig;
pub use dto::common::{Page, PageWindow, PaginationParams};
pub use dto::leaderboard::{GroupsView, LeaderboardSummary, LeaderboardView, ViewOptions};
pub use error::{LeaderboardError, Result};
pub use models::{
    CanonicalEntry, ColumnDescriptor, ColumnSet, CompetitorGroup, CompetitorKey, FieldAlias,
    MAX_DURATION,
};
pub use services::combine::combine;
pub use services::grouping::{group_by, group_by_competitor, sort_groups};
pub use services::normalizer::{NormalizeContext, normalize, normalize_all};
pub use services::pagination::{Paginator, paginate};
pub use services::ranking::SortMode;
pub use services::search::{CompetitorQuery, EntryFilter, search};

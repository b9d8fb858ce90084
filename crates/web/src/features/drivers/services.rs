use leaderboard::{GroupsView, ViewOptions, dto::leaderboard::DriverQuery, search};
use validator::Validate;

use crate::error::WebResult;
use crate::state::AppState;

/// Search competitors across every loaded leaderboard
pub fn search_drivers(state: &AppState, query: &DriverQuery) -> WebResult<GroupsView> {
    let pagination = query.pagination(state.config.page_size);
    pagination.validate()?;
    let sort = query.sort_mode()?;

    let entries = state
        .leaderboards
        .iter()
        .flat_map(|l| l.entries.iter().cloned());
    let groups = search(entries, &query.query(), &query.filter());
    tracing::debug!("Driver search '{}' matched {} competitor(s)", query.name, groups.len());

    Ok(GroupsView::build(
        groups,
        &state.config.columns,
        ViewOptions {
            sort,
            page: Some(pagination.page),
            page_size: pagination.page_size,
            driver: None,
        },
    ))
}

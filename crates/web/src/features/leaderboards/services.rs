use leaderboard::{
    GroupsView, LeaderboardSummary, LeaderboardView, ViewOptions, group_by_competitor,
    dto::leaderboard::LeaderboardQuery,
};
use validator::Validate;

use crate::error::{WebError, WebResult};
use crate::state::AppState;

/// List every loaded leaderboard
pub fn list_leaderboards(state: &AppState) -> Vec<LeaderboardSummary> {
    state.leaderboards.iter().map(|l| l.summary()).collect()
}

fn view_options<'a>(
    state: &AppState,
    query: &'a LeaderboardQuery,
) -> WebResult<ViewOptions<'a>> {
    let pagination = query.pagination(state.config.page_size);
    pagination.validate()?;

    Ok(ViewOptions {
        sort: query.sort_mode()?,
        page: query.page.map(|_| pagination.page),
        page_size: pagination.page_size,
        driver: query.driver.as_deref(),
    })
}

/// Get one leaderboard, sorted and paginated
pub fn get_leaderboard(
    state: &AppState,
    id: &str,
    query: &LeaderboardQuery,
) -> WebResult<LeaderboardView> {
    let options = view_options(state, query)?;
    let loaded = state
        .find(id)
        .ok_or_else(|| WebError::NotFound(format!("Leaderboard '{}'", id)))?;

    Ok(LeaderboardView::build(
        loaded.summary(),
        loaded.entries.clone(),
        &state.config.columns,
        options,
    ))
}

/// Get one leaderboard grouped by competitor
pub fn get_leaderboard_groups(
    state: &AppState,
    id: &str,
    query: &LeaderboardQuery,
) -> WebResult<GroupsView> {
    let options = view_options(state, query)?;
    let loaded = state
        .find(id)
        .ok_or_else(|| WebError::NotFound(format!("Leaderboard '{}'", id)))?;

    let groups = group_by_competitor(loaded.entries.iter().cloned());
    Ok(GroupsView::build(groups, &state.config.columns, options))
}

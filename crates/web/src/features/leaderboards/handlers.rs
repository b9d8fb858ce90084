use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use leaderboard::{
    GroupsView, LeaderboardSummary, LeaderboardView, dto::leaderboard::LeaderboardQuery,
};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboards",
    responses(
        (status = 200, description = "List all loaded leaderboards", body = Vec<LeaderboardSummary>)
    ),
    tag = "leaderboards"
)]
pub async fn list_leaderboards(State(state): State<AppState>) -> Result<Response, WebError> {
    let summaries = services::list_leaderboards(&state);

    Ok(Json(summaries).into_response())
}

#[utoipa::path(
    get,
    path = "/api/leaderboards/{id}",
    params(
        ("id" = String, Path, description = "Leaderboard id (export file stem)"),
        LeaderboardQuery
    ),
    responses(
        (status = 200, description = "Sorted and paginated leaderboard", body = LeaderboardView),
        (status = 400, description = "Unknown sort mode or invalid pagination"),
        (status = 404, description = "Leaderboard not found")
    ),
    tag = "leaderboards"
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    let view = services::get_leaderboard(&state, &id, &query)?;

    Ok(Json(view).into_response())
}

#[utoipa::path(
    get,
    path = "/api/leaderboards/{id}/groups",
    params(
        ("id" = String, Path, description = "Leaderboard id (export file stem)"),
        LeaderboardQuery
    ),
    responses(
        (status = 200, description = "Entries grouped by competitor, paginated over groups", body = GroupsView),
        (status = 400, description = "Unknown sort mode or invalid pagination"),
        (status = 404, description = "Leaderboard not found")
    ),
    tag = "leaderboards"
)]
pub async fn get_leaderboard_groups(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    let view = services::get_leaderboard_groups(&state, &id, &query)?;

    Ok(Json(view).into_response())
}

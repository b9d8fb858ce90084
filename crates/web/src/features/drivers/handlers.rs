use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use leaderboard::{GroupsView, dto::leaderboard::DriverQuery};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/drivers",
    params(DriverQuery),
    responses(
        (status = 200, description = "Matching competitors with their filtered entries", body = GroupsView),
        (status = 400, description = "Unknown sort mode or invalid pagination")
    ),
    tag = "drivers"
)]
pub async fn search_drivers(
    State(state): State<AppState>,
    query: Result<Query<DriverQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    let view = services::search_drivers(&state, &query)?;

    Ok(Json(view).into_response())
}

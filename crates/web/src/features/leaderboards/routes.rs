use axum::{Router, routing::get};

use super::handlers::{get_leaderboard, get_leaderboard_groups, list_leaderboards};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_leaderboards))
        .route("/:id", get(get_leaderboard))
        .route("/:id/groups", get(get_leaderboard_groups))
}

use axum::{Router, routing::get};

use super::handlers::search_drivers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(search_drivers))
}

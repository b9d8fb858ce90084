use axum::Router;

use crate::features::{drivers, leaderboards};
use crate::state::AppState;

pub fn configure() -> Router<AppState> {
    Router::new()
        .nest("/leaderboards", leaderboards::routes::routes())
        .nest("/drivers", drivers::routes::routes())
}

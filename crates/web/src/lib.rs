use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod features;
pub mod routes;
pub mod state;

pub use config::Config;
pub use state::AppState;

use features::{drivers, leaderboards};

#[derive(OpenApi)]
#[openapi(
    paths(
        leaderboards::handlers::list_leaderboards,
        leaderboards::handlers::get_leaderboard,
        leaderboards::handlers::get_leaderboard_groups,
        drivers::handlers::search_drivers,
    ),
    components(
        schemas(
            leaderboard::LeaderboardSummary,
            leaderboard::LeaderboardView,
            leaderboard::GroupsView,
            leaderboard::PageWindow,
            leaderboard::SortMode,
            leaderboard::CanonicalEntry,
            leaderboard::dto::leaderboard::ColumnView,
            leaderboard::dto::leaderboard::EntryView,
            leaderboard::dto::leaderboard::GroupView,
        )
    ),
    tags(
        (name = "leaderboards", description = "Sorted and paginated leaderboards"),
        (name = "drivers", description = "Competitor search across leaderboards"),
    )
)]
pub struct ApiDoc;

/// The full application router: `/api`, Swagger UI and CORS.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", routes::configure())
        .layer(cors)
        .with_state(state)
}

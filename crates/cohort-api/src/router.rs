//! Axum router construction for the Cohort API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the Cohort server.
///
/// The router includes:
/// - `POST /users` -- replace the snapshot
/// - `GET /users` -- superusers
/// - `GET /top-countries` -- top 5 countries
/// - `GET /team-insights` -- per-team statistics
/// - `GET /active-users-per-day` -- logins per day
/// - `GET /evaluation` -- self-check report
/// - `GET /health` -- liveness probe
///
/// CORS allows any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/users",
            get(handlers::list_superusers).post(handlers::ingest_users),
        )
        .route("/top-countries", get(handlers::top_countries))
        .route("/team-insights", get(handlers::team_insights))
        .route("/active-users-per-day", get(handlers::active_users_per_day))
        .route("/evaluation", get(handlers::evaluation))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

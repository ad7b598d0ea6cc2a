//! REST API endpoint handlers for the Cohort server.
//!
//! Query handlers clone the current snapshot out of the shared
//! [`RecordStore`](cohort_core::RecordStore) and run one aggregator over
//! it; the lock is never held while aggregating.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/users` | Replace the snapshot with a batch of people |
//! | `GET` | `/users` | Superusers (score >= 900, active) |
//! | `GET` | `/top-countries` | Top 5 countries by people scoring > 800 |
//! | `GET` | `/team-insights` | Per-team statistics |
//! | `GET` | `/active-users-per-day` | Logins per day (`?min=N`) |
//! | `GET` | `/evaluation` | Self-check report over the endpoints above |
//! | `GET` | `/health` | Liveness probe |

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use cohort_core::aggregate;
use cohort_types::{CountryCount, DailyLogins, Person, Report, TeamInsight};
use tracing::info;

use crate::error::ApiError;
use crate::evaluation::{EvaluationReport, SelfCheck};
use crate::router::build_router;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `GET /active-users-per-day` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct ActiveUsersQuery {
    /// Keep only days with at least this many logins. Must be >= 0.
    pub min: Option<i64>,
}

/// Response body for `POST /users`.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct IngestResponse {
    /// Confirmation including the number of people stored.
    pub message: String,
}

// ---------------------------------------------------------------------------
// POST /users -- ingest
// ---------------------------------------------------------------------------

/// Replace the cached snapshot with the posted batch of people.
///
/// Any decoding or validation failure rejects the whole batch with
/// `422 Unprocessable Entity` and leaves the previous snapshot in place.
pub async fn ingest_users(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Vec<Person>>, JsonRejection>,
) -> Result<Json<IngestResponse>, ApiError> {
    let Json(people) = payload.map_err(|e| ApiError::UnprocessableBody(e.body_text()))?;

    let count = state.store.replace_all(people).await?;

    Ok(Json(IngestResponse {
        message: format!("{count} pessoas armazenadas em cache"),
    }))
}

// ---------------------------------------------------------------------------
// GET /users -- superusers
// ---------------------------------------------------------------------------

/// Active people with a score of at least 900.
pub async fn list_superusers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Report<Person>>, ApiError> {
    let snapshot = state.store.read_all().await?;
    Ok(Json(aggregate::superusers(&snapshot)))
}

// ---------------------------------------------------------------------------
// GET /top-countries
// ---------------------------------------------------------------------------

/// The five countries with the most people scoring above 800.
pub async fn top_countries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Report<CountryCount>>, ApiError> {
    let snapshot = state.store.read_all().await?;
    Ok(Json(aggregate::top_countries(&snapshot)))
}

// ---------------------------------------------------------------------------
// GET /team-insights
// ---------------------------------------------------------------------------

/// Member, leader, completed-project, and activity statistics per team.
pub async fn team_insights(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Report<TeamInsight>>, ApiError> {
    let snapshot = state.store.read_all().await?;
    Ok(Json(aggregate::team_insights(&snapshot)))
}

// ---------------------------------------------------------------------------
// GET /active-users-per-day
// ---------------------------------------------------------------------------

/// Login counts per day.
///
/// # Query Parameters
///
/// - `min`: keep only days with at least this many logins. Negative or
///   non-integer values are rejected with `400 Bad Request` before the
///   store is consulted.
pub async fn active_users_per_day(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ActiveUsersQuery>, QueryRejection>,
) -> Result<Json<Report<DailyLogins>>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let min_logins = aggregate::parse_min_logins(params.min)?;

    let snapshot = state.store.read_all().await?;
    Ok(Json(aggregate::active_users_per_day(&snapshot, min_logins)))
}

// ---------------------------------------------------------------------------
// GET /evaluation -- self-check
// ---------------------------------------------------------------------------

/// Exercise every query endpoint in-process and report status and timing.
///
/// Always answers `200 OK`; endpoint failures are reported inside the body.
pub async fn evaluation(State(state): State<Arc<AppState>>) -> Json<EvaluationReport> {
    let report = SelfCheck::new(build_router(state)).run().await;
    info!(status = ?report.response.status, "self-check finished");
    Json(report)
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

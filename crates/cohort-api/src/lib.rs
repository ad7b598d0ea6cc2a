//! HTTP API for the Cohort analytics service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Ingestion** (`POST /users`) replacing the cached snapshot of people
//! - **Aggregation endpoints** for superusers, top countries, team
//!   insights, and logins per day
//! - **Self-check** (`GET /evaluation`) that exercises the aggregation
//!   endpoints in-process and reports status and latency
//!
//! # Architecture
//!
//! Handlers share an [`AppState`] owning a
//! [`RecordStore`](cohort_core::RecordStore). Each query clones the
//! current snapshot `Arc` and aggregates outside the lock, so ingestion
//! never exposes a half-written snapshot.

pub mod error;
pub mod evaluation;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use evaluation::{EvaluationReport, SelfCheck};
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;

//! In-process self-check of the query endpoints.
//!
//! [`SelfCheck`] drives the Axum [`Router`] directly through
//! [`tower::ServiceExt::oneshot`], so no socket, host, or port is
//! involved. Each endpoint is requested once, in order, and a failure on
//! one endpoint never stops the remaining checks.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use cohort_core::timing::duration_ms;
use serde::{Deserialize, Serialize};
use tower::ServiceExt;
use tracing::warn;

/// Endpoints exercised by a default [`SelfCheck`].
pub const CHECKED_ENDPOINTS: [&str; 4] = [
    "/users",
    "/top-countries",
    "/team-insights",
    "/active-users-per-day",
];

/// Description returned alongside every evaluation report.
pub const EVALUATION_DESCRIPTION: &str = "Executa testes automáticos nos endpoints da própria API e retorna um relatório de pontuação.";

/// Outcome of requesting one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointCheck {
    /// HTTP status returned, or `None` if no response was obtained.
    pub status_code: Option<u16>,
    /// Whether the status was `200 OK`.
    pub status_ok: bool,
    /// Round-trip time in milliseconds, two decimals.
    pub time_ms: Option<f64>,
    /// Whether the body parsed as JSON.
    pub valid_response: bool,
    /// Transport failure description, present only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EndpointCheck {
    /// A check that produced no usable response.
    fn transport_failure(error: String) -> Self {
        Self {
            status_code: None,
            status_ok: false,
            time_ms: None,
            valid_response: false,
            error: Some(error),
        }
    }
}

/// Per-endpoint results keyed by endpoint path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationBody {
    /// One entry per checked endpoint.
    pub tested_endpoints: BTreeMap<String, EndpointCheck>,
}

/// Overall status plus the per-endpoint results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    /// `200` when every endpoint succeeded; otherwise the status of the
    /// first endpoint (in check order) that did not. `None` if that
    /// endpoint produced no response at all.
    pub status: Option<u16>,
    /// Per-endpoint results.
    pub body: EvaluationBody,
}

/// Full self-check report served by `GET /evaluation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Fixed description of what the report contains.
    #[serde(rename = "descricao")]
    pub description: String,
    /// Outcome of the run.
    pub response: EvaluationOutcome,
}

/// Runs GET requests against a router and collects an [`EvaluationReport`].
#[derive(Debug, Clone)]
pub struct SelfCheck {
    router: Router,
    endpoints: Vec<String>,
}

impl SelfCheck {
    /// Check the default [`CHECKED_ENDPOINTS`] on `router`.
    pub fn new(router: Router) -> Self {
        Self::with_endpoints(router, CHECKED_ENDPOINTS)
    }

    /// Check a custom list of paths (query strings allowed) on `router`.
    pub fn with_endpoints<I, S>(router: Router, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            router,
            endpoints: endpoints.into_iter().map(Into::into).collect(),
        }
    }

    /// Request every endpoint in order and build the report.
    pub async fn run(&self) -> EvaluationReport {
        let mut overall: Option<Option<u16>> = None;
        let mut tested_endpoints = BTreeMap::new();

        for path in &self.endpoints {
            let check = self.check(path).await;
            if !check.status_ok {
                warn!(
                    endpoint = %path,
                    status = ?check.status_code,
                    error = ?check.error,
                    "self-check endpoint failed"
                );
                // Only the first failure is reported.
                if overall.is_none() {
                    overall = Some(check.status_code);
                }
            }
            tested_endpoints.insert(endpoint_key(path).to_owned(), check);
        }

        EvaluationReport {
            description: EVALUATION_DESCRIPTION.to_owned(),
            response: EvaluationOutcome {
                status: overall.unwrap_or(Some(StatusCode::OK.as_u16())),
                body: EvaluationBody { tested_endpoints },
            },
        }
    }

    /// Request a single endpoint and time the round trip.
    async fn check(&self, path: &str) -> EndpointCheck {
        let request = match Request::get(path).body(Body::empty()) {
            Ok(request) => request,
            Err(e) => return EndpointCheck::transport_failure(format!("invalid request: {e}")),
        };

        let started = Instant::now();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});
        let status = response.status();

        let bytes = match axum::body::to_bytes(response.into_body(), usize::MAX).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return EndpointCheck::transport_failure(format!("failed to read body: {e}"));
            }
        };
        let time_ms = duration_ms(started.elapsed());

        EndpointCheck {
            status_code: Some(status.as_u16()),
            status_ok: status == StatusCode::OK,
            time_ms: Some(time_ms),
            valid_response: serde_json::from_slice::<serde_json::Value>(&bytes).is_ok(),
            error: None,
        }
    }
}

/// Report key for a path: the path without its query string.
fn endpoint_key(path: &str) -> &str {
    path.split_once('?').map_or(path, |(key, _)| key)
}

//! Integration tests for the Cohort API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::Router;
use cohort_api::router::build_router;
use cohort_api::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

fn person(score: i64, active: bool, country: &str, team: &str, leader: bool) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "nome": format!("person-{score}"),
        "idade": 30,
        "score": score,
        "ativo": active,
        "pais": country,
        "equipe": {
            "nome": team,
            "lider": leader,
            "projetos": [
                {"nome": "alpha", "concluido": true},
                {"nome": "beta", "concluido": false}
            ]
        },
        "logs": [
            {"data": "2025-03-01", "acao": "login"},
            {"data": "2025-03-02", "acao": "logout"},
            {"data": "2025-03-02", "acao": "login"}
        ]
    })
}

fn sample_payload() -> Value {
    json!([
        person(950, true, "BR", "Core", true),
        person(850, true, "BR", "Core", false),
        person(820, false, "US", "Ops", false),
        person(120, false, "AR", "Ops", true),
    ])
}

fn router() -> Router {
    build_router(Arc::new(AppState::new()))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_users(router: &Router, payload: &Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::post("/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn get_json(router: &Router, path: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// =========================================================================
// Ingestion
// =========================================================================

#[tokio::test]
async fn test_ingest_reports_count() {
    let router = router();
    let (status, json) = post_users(&router, &sample_payload()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "4 pessoas armazenadas em cache");
}

#[tokio::test]
async fn test_ingest_rejects_bad_uuid_and_keeps_snapshot() {
    let router = router();
    post_users(&router, &json!([person(950, true, "BR", "Core", true)])).await;

    let mut bad = sample_payload();
    bad[2]["id"] = json!("not-a-uuid");
    let (status, json) = post_users(&router, &bad).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["status"], 422);

    let (status, json) = get_json(&router, "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
}

#[tokio::test]
async fn test_ingest_rejects_non_v4_uuid() {
    let router = router();
    let mut bad = sample_payload();
    bad[0]["id"] = json!(Uuid::now_v7());

    let (status, _) = post_users(&router, &bad).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = get_json(&router, "/users").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ingest_rejects_bad_date_and_float_score() {
    let router = router();

    let mut bad_date = sample_payload();
    bad_date[1]["logs"][0]["data"] = json!("2025-13-01");
    assert_eq!(
        post_users(&router, &bad_date).await.0,
        StatusCode::UNPROCESSABLE_ENTITY
    );

    let mut bad_score = sample_payload();
    bad_score[1]["score"] = json!(900.5);
    assert_eq!(
        post_users(&router, &bad_score).await.0,
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_ingest_rejects_malformed_json() {
    let router = router();
    let response = router
        .oneshot(
            Request::post("/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("[{"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// =========================================================================
// Empty store
// =========================================================================

#[tokio::test]
async fn test_queries_before_ingest_return_404() {
    let router = router();
    for path in [
        "/users",
        "/top-countries",
        "/team-insights",
        "/active-users-per-day",
        "/active-users-per-day?min=1",
    ] {
        let (status, json) = get_json(&router, path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(json["error"], "Nenhuma pessoa em cache");
    }
}

// =========================================================================
// Aggregations
// =========================================================================

#[tokio::test]
async fn test_superusers() {
    let router = router();
    let payload = json!([
        person(950, true, "BR", "Core", false),
        person(800, true, "BR", "Core", false),
        person(120, false, "US", "Ops", false),
    ]);
    post_users(&router, &payload).await;

    let (status, json) = get_json(&router, "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["score"], 950);
    assert_eq!(json["data"][0]["id"], payload[0]["id"]);
    assert!(json["processing_time_ms"].is_number());
}

#[tokio::test]
async fn test_top_countries() {
    let router = router();
    let payload = json!([
        person(900, true, "BR", "Core", false),
        person(850, false, "BR", "Core", false),
        person(810, true, "US", "Ops", false),
    ]);
    post_users(&router, &payload).await;

    let (status, json) = get_json(&router, "/top-countries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);
    assert_eq!(json["data"], json!([["BR", 2], ["US", 1]]));
}

#[tokio::test]
async fn test_team_insights() {
    let router = router();
    post_users(&router, &sample_payload()).await;

    let (status, json) = get_json(&router, "/team-insights").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);

    let core = &json["data"][0];
    assert_eq!(core["team_name"], "Core");
    assert_eq!(core["total_membros"], 2);
    assert_eq!(core["lideres"], 1);
    assert_eq!(core["projetos_concluidos"], 2);
    assert_eq!(core["percentagem_ativos"], 100.0);

    let ops = &json["data"][1];
    assert_eq!(ops["team_name"], "Ops");
    assert_eq!(ops["percentagem_ativos"], 0.0);
}

#[tokio::test]
async fn test_active_users_per_day() {
    let router = router();
    post_users(&router, &sample_payload()).await;

    let (status, json) = get_json(&router, "/active-users-per-day").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["data"],
        json!([
            {"data": "2025-03-01", "logins": 4},
            {"data": "2025-03-02", "logins": 4}
        ])
    );

    let (_, json) = get_json(&router, "/active-users-per-day?min=5").await;
    assert_eq!(json["total"], 0);

    let (_, json) = get_json(&router, "/active-users-per-day?min=4").await;
    assert_eq!(json["total"], 2);
}

#[tokio::test]
async fn test_active_users_rejects_negative_min() {
    let router = router();
    post_users(&router, &sample_payload()).await;

    let (status, json) = get_json(&router, "/active-users-per-day?min=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_active_users_rejects_negative_min_before_empty_check() {
    let router = router();
    let (status, _) = get_json(&router, "/active-users-per-day?min=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(&router, "/active-users-per-day?min=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reingest_is_idempotent() {
    let router = router();
    let payload = sample_payload();
    let paths = ["/users", "/top-countries", "/team-insights", "/active-users-per-day"];

    post_users(&router, &payload).await;
    let mut first = Vec::new();
    for path in paths {
        let (_, mut json) = get_json(&router, path).await;
        json["processing_time_ms"] = Value::Null;
        first.push(json);
    }

    post_users(&router, &payload).await;
    for (path, expected) in paths.iter().zip(first) {
        let (_, mut json) = get_json(&router, path).await;
        json["processing_time_ms"] = Value::Null;
        assert_eq!(json, expected, "{path}");
    }
}

// =========================================================================
// Evaluation
// =========================================================================

#[tokio::test]
async fn test_evaluation_after_ingest() {
    let router = router();
    post_users(&router, &sample_payload()).await;

    let (status, json) = get_json(&router, "/evaluation").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["descricao"].is_string());
    assert_eq!(json["response"]["status"], 200);

    let tested = json["response"]["body"]["tested_endpoints"].as_object().unwrap();
    assert_eq!(tested.len(), 4);
    for (name, check) in tested {
        assert_eq!(check["status_code"], 200, "{name}");
        assert_eq!(check["status_ok"], true, "{name}");
        assert_eq!(check["valid_response"], true, "{name}");
        assert!(check["time_ms"].is_number(), "{name}");
        assert!(check.get("error").is_none(), "{name}");
    }
}

#[tokio::test]
async fn test_evaluation_on_empty_store_reports_404() {
    let router = router();

    let (status, json) = get_json(&router, "/evaluation").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"]["status"], 404);

    let users = &json["response"]["body"]["tested_endpoints"]["/users"];
    assert_eq!(users["status_code"], 404);
    assert_eq!(users["status_ok"], false);
    assert_eq!(users["valid_response"], true);
}

// =========================================================================
// Misc
// =========================================================================

#[tokio::test]
async fn test_health() {
    let (status, json) = get_json(&router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let response = router()
        .oneshot(Request::get("/api/nonexistent").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_separate_states_are_isolated() {
    let populated = router();
    post_users(&populated, &sample_payload()).await;

    let fresh = router();
    let (status, _) = get_json(&fresh, "/users").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

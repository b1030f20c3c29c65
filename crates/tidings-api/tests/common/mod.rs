//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tidings_core::cancellation::CancellationToken;
use tidings_core::clock::Clock;
use tidings_reminders::domain::reminder::Reminder;
use tidings_store::in_memory::InMemoryRepository;
use tidings_test_support::FixedClock;
use tower::ServiceExt;

use tidings_api::app;
use tidings_api::routes::reminders::USER_ID_HEADER;
use tidings_api::state::AppState;

/// Fixed timestamp used across all integration tests.
pub fn fixed_now() -> chrono::DateTime<chrono::Utc> {
    chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap()
}

fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(fixed_now()))
}

/// Build the full app router over an in-memory repository and a fixed clock.
/// Uses the same wiring as `main.rs`.
pub fn build_test_app(repository: Arc<InMemoryRepository<Reminder>>, api_version: &str) -> Router {
    build_test_app_with_shutdown(repository, api_version, CancellationToken::new())
}

/// Like [`build_test_app`], but the caller owns the shutdown token.
pub fn build_test_app_with_shutdown(
    repository: Arc<InMemoryRepository<Reminder>>,
    api_version: &str,
    shutdown: CancellationToken,
) -> Router {
    let mediator = app::build_mediator(repository, fixed_clock(), api_version).unwrap();
    app::router(AppState::new(Arc::new(mediator), shutdown))
}

/// Send a POST request with a JSON body, optionally identified, and return
/// the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    user_id: Option<String>,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header(USER_ID_HEADER, user_id);
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

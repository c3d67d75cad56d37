//! Tests for the root-level health endpoint and shared middleware.

mod common;

use std::sync::Arc;

use assetboard_core::memory::MemoryGateway;
use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn health_reports_configured_store() {
    let app = common::build_test_app(Arc::new(MemoryGateway::new()));
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["configured"], true);
    assert_eq!(json["chat_enabled"], false);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_reports_not_configured_state() {
    let app = common::build_unconfigured_app();
    let json = body_json(get(app, "/health").await).await;

    assert_eq!(json["status"], "not_configured");
    assert_eq!(json["configured"], false);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = common::build_test_app(Arc::new(MemoryGateway::new()));
    let response = get(app, "/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(Arc::new(MemoryGateway::new()));
    let response = get(app, "/api/v1/nothing-here").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

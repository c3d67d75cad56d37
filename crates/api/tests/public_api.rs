//! HTTP-level tests for the public read API (`/api/assets`, `/api/providers`).

mod common;

use std::sync::Arc;

use assetboard_core::gateway::{AssetGateway, CatalogGateway};
use assetboard_core::memory::MemoryGateway;
use assetboard_core::models::{AssetStatus, NewProvider};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, options, post_json, seed_asset};
use tower::ServiceExt;

async fn seeded() -> Arc<MemoryGateway> {
    let store = Arc::new(MemoryGateway::new());
    let apollo = seed_asset(&store, "Apollo Petite Roulette", "Evolution").await;
    seed_asset(&store, "Crazy Time", "Evolution").await;
    seed_asset(&store, "Sweet Bonanza", "Pragmatic").await;
    store
        .update_status(apollo.id, AssetStatus::Completed)
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn assets_include_compact_game_name() {
    let app = common::build_test_app(seeded().await);
    let response = get(app, "/api/assets?provider=evolution").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["returned"], 2);
    let apollo = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["game_name"] == "Apollo Petite Roulette")
        .unwrap()
        .clone();
    assert_eq!(apollo["gamename"], "apollopetiteroulette");
    assert_eq!(apollo["provider"], "Evolution");
    assert_eq!(apollo["status"], "completed");
}

#[tokio::test]
async fn assets_filter_by_status_and_cap_returned_rows() {
    let app = common::build_test_app(seeded().await);
    let json = body_json(get(app.clone(), "/api/assets?status=not-started").await).await;
    assert_eq!(json["count"], 2);

    let json = body_json(get(app, "/api/assets?limit=1").await).await;
    assert_eq!(json["count"], 3);
    assert_eq!(json["returned"], 1);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_status_is_rejected_with_details() {
    let app = common::build_test_app(seeded().await);
    let response = get(app, "/api/assets?status=finished").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid status");
    assert!(json["details"].as_str().unwrap().contains("finished"));
}

#[tokio::test]
async fn upstream_failure_returns_500_with_details() {
    let store = seeded().await;
    store.set_unavailable(true).await;
    let app = common::build_test_app(store);

    let response = get(app.clone(), "/api/assets").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to fetch assets");
    assert!(json["details"].is_string());

    let response = get(app, "/api/providers").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unconfigured_store_returns_503() {
    let app = common::build_unconfigured_app();
    let response = get(app, "/api/assets").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert!(json["details"].as_str().unwrap().contains("DATABASE_URL"));
}

#[tokio::test]
async fn providers_list_has_count() {
    let store = Arc::new(MemoryGateway::new());
    for name in ["Pragmatic", "Evolution"] {
        store
            .create_provider(&NewProvider { name: name.into() })
            .await
            .unwrap();
    }
    let app = common::build_test_app(store);

    let json = body_json(get(app, "/api/providers").await).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["data"][0]["name"], "Evolution");
    assert!(json["data"][0]["id"].is_number());
}

#[tokio::test]
async fn non_get_methods_return_405() {
    let app = common::build_test_app(seeded().await);
    let response = post_json(app.clone(), "/api/assets", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/api/providers")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Method not allowed");
}

#[tokio::test]
async fn options_returns_200() {
    let app = common::build_test_app(seeded().await);
    let response = options(app, "/api/assets").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn preflight_allows_any_origin() {
    let app = common::build_test_app(seeded().await);
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/providers")
        .header("origin", "https://reports.example.com")
        .header("access-control-request-method", "GET")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

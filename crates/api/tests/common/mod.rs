#![allow(dead_code)]

use std::sync::Arc;

use assetboard_api::chat::ChatClient;
use assetboard_api::config::{ChatConfig, ServerConfig};
use assetboard_api::router::build_app_router;
use assetboard_api::state::AppState;
use assetboard_core::gateway::{AssetGateway, CatalogGateway, DataSource, Unconfigured};
use assetboard_core::memory::MemoryGateway;
use assetboard_core::models::{Asset, Brand, NewAsset, NewBrand};
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        chat: ChatConfig::default(),
    }
}

fn build_app(data: Arc<dyn DataSource>, configured: bool, chat: ChatConfig) -> Router {
    let mut config = test_config();
    config.chat = chat;
    let chat = ChatClient::from_config(&config.chat).unwrap().map(Arc::new);
    let state = AppState {
        data,
        configured,
        config: Arc::new(config.clone()),
        chat,
    };
    build_app_router(state, &config)
}

/// Build the full application router (same middleware stack as production)
/// over the given in-memory store.
pub fn build_test_app(store: Arc<MemoryGateway>) -> Router {
    build_app(store, true, ChatConfig::default())
}

/// Like [`build_test_app`] with the chat client pointed at `api_base`.
pub fn build_chat_app(store: Arc<MemoryGateway>, api_base: &str) -> Router {
    let chat = ChatConfig {
        api_key: Some("test-key".to_string()),
        api_base: api_base.to_string(),
        ..Default::default()
    };
    build_app(store, true, chat)
}

/// Router in the "not configured" state.
pub fn build_unconfigured_app() -> Router {
    build_app(Arc::new(Unconfigured), false, ChatConfig::default())
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

pub async fn seed_asset(store: &MemoryGateway, game: &str, provider: &str) -> Asset {
    store
        .create_asset(&NewAsset {
            game_name: game.to_string(),
            provider: provider.to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
}

pub async fn seed_brand(store: &MemoryGateway, name: &str) -> Brand {
    store
        .create_brand(&NewBrand {
            name: name.to_string(),
            color: None,
        })
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn options(app: Router, uri: &str) -> Response {
    send(app, Method::OPTIONS, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(json)).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(json)).await
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

//! Route definitions for the lookup tables.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Nested at `/providers`.
pub fn providers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_providers).post(catalog::create_provider))
        .route("/{id}", delete(catalog::delete_provider))
}

/// Nested at `/brands`.
pub fn brands_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_brands).post(catalog::create_brand))
        .route("/{id}", put(catalog::update_brand).delete(catalog::delete_brand))
}

/// Nested at `/designers`.
pub fn designers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_designers).post(catalog::create_designer))
        .route(
            "/{id}",
            put(catalog::update_designer).delete(catalog::delete_designer),
        )
}

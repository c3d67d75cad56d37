//! Public read API, mounted at the root (not under `/api/v1`).
//!
//! ```text
//! /api/assets        GET (OPTIONS for preflight)
//! /api/providers     GET (OPTIONS for preflight)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/assets",
            get(public::list_assets)
                .options(public::preflight)
                .fallback(public::method_not_allowed),
        )
        .route(
            "/api/providers",
            get(public::list_providers)
                .options(public::preflight)
                .fallback(public::method_not_allowed),
        )
}

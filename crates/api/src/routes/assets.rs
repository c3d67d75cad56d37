//! Route definitions for asset endpoints, nested at `/assets`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{assets, bulk};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets).post(assets::create_asset))
        .route("/batch-delete", post(bulk::batch_delete))
        .route("/batch/preview", post(bulk::preview_batch))
        .route("/batch/commit", post(bulk::commit_batch_add))
        .route("/bulk-update", post(bulk::text_match_update))
        .route("/range-edit", post(bulk::range_edit))
        .route("/{id}", get(assets::get_asset).delete(assets::delete_asset))
        .route("/{id}/status", put(assets::update_status))
        .route("/{id}/designer", put(assets::update_designer))
        .route("/{id}/brands/{brand_id}", put(assets::set_brand_reflected))
}

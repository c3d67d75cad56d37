pub mod assets;
pub mod catalog;
pub mod health;
pub mod public;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /assets                              list, create
/// /assets/{id}                         get, delete
/// /assets/{id}/status                  set status (PUT)
/// /assets/{id}/designer                set or clear designer (PUT)
/// /assets/{id}/brands/{brand_id}       set reflected flag (PUT)
/// /assets/batch-delete                 delete many (POST)
/// /assets/batch/preview                duplicate detection preview (POST)
/// /assets/batch/commit                 batch add with brand merge (POST)
/// /assets/bulk-update                  text-match status/designer update (POST)
/// /assets/range-edit                   apply a dragged value to a row range (POST)
///
/// /providers                           list, create
/// /providers/{id}                      delete
/// /brands                              list, create
/// /brands/{id}                         update, delete
/// /designers                           list, create
/// /designers/{id}                      update, delete
///
/// /tools/convert-titles                title converter (POST)
/// /chat                                AI assistant (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/assets", assets::router())
        .nest("/providers", catalog::providers_router())
        .nest("/brands", catalog::brands_router())
        .nest("/designers", catalog::designers_router())
        .route("/tools/convert-titles", post(handlers::tools::convert))
        .route("/chat", post(handlers::chat::chat))
}

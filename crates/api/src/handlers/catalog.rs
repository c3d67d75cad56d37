//! Handlers for the lookup tables: providers, brands and designers.

use assetboard_core::error::CoreError;
use assetboard_core::models::{BrandPatch, DesignerPatch, NewBrand, NewDesigner, NewProvider};
use assetboard_core::types::DbId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

fn deleted(found: bool, entity: &'static str, id: DbId) -> AppResult<StatusCode> {
    if found {
        tracing::info!(entity, id, "Catalog entry deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound { entity, id }.into())
    }
}

// ---------------------------------------------------------------------------
// Providers
// ---------------------------------------------------------------------------

/// GET /api/v1/providers
pub async fn list_providers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let providers = state.data.list_providers().await?;
    Ok(Json(DataResponse { data: providers }))
}

/// POST /api/v1/providers
pub async fn create_provider(
    State(state): State<AppState>,
    Json(input): Json<NewProvider>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let provider = state.data.create_provider(&input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: provider })))
}

/// DELETE /api/v1/providers/{id}
pub async fn delete_provider(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let found = state.data.delete_provider(id).await?;
    deleted(found, "Provider", id)
}

// ---------------------------------------------------------------------------
// Brands
// ---------------------------------------------------------------------------

/// GET /api/v1/brands
pub async fn list_brands(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let brands = state.data.list_brands().await?;
    Ok(Json(DataResponse { data: brands }))
}

/// POST /api/v1/brands
pub async fn create_brand(
    State(state): State<AppState>,
    Json(input): Json<NewBrand>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let brand = state.data.create_brand(&input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: brand })))
}

/// PUT /api/v1/brands/{id}
pub async fn update_brand(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<BrandPatch>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let brand = state
        .data
        .update_brand(id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "Brand", id })?;
    Ok(Json(DataResponse { data: brand }))
}

/// DELETE /api/v1/brands/{id}
pub async fn delete_brand(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let found = state.data.delete_brand(id).await?;
    deleted(found, "Brand", id)
}

// ---------------------------------------------------------------------------
// Designers
// ---------------------------------------------------------------------------

/// GET /api/v1/designers
pub async fn list_designers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let designers = state.data.list_designers().await?;
    Ok(Json(DataResponse { data: designers }))
}

/// POST /api/v1/designers
pub async fn create_designer(
    State(state): State<AppState>,
    Json(input): Json<NewDesigner>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let designer = state.data.create_designer(&input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: designer })))
}

/// PUT /api/v1/designers/{id}
pub async fn update_designer(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DesignerPatch>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let designer = state
        .data
        .update_designer_profile(id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "Designer", id })?;
    Ok(Json(DataResponse { data: designer }))
}

/// DELETE /api/v1/designers/{id}
pub async fn delete_designer(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let found = state.data.delete_designer(id).await?;
    deleted(found, "Designer", id)
}

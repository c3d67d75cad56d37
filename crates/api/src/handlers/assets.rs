//! Handlers for single-asset endpoints.

use assetboard_core::duplicates::{find_duplicate, DuplicateMatch};
use assetboard_core::error::CoreError;
use assetboard_core::models::{Asset, AssetFilter, AssetStatus, NewAsset};
use assetboard_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use assetboard_core::session::{AssetSession, SortKey, ViewQuery};
use assetboard_core::types::DbId;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /assets`.
///
/// `provider` and `status` are applied by the data source; `search`,
/// `designer_id` and the sort order are applied to the fetched records.
#[derive(Debug, Default, Deserialize)]
pub struct AssetListParams {
    pub provider: Option<String>,
    pub status: Option<AssetStatus>,
    pub search: Option<String>,
    pub designer_id: Option<DbId>,
    pub sort: Option<SortKey>,
    #[serde(default)]
    pub descending: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: AssetStatus,
}

/// `designer_id: null` unassigns.
#[derive(Debug, Deserialize)]
pub struct DesignerBody {
    pub designer_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct ReflectedBody {
    pub reflected: bool,
    pub reflected_by: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_asset(state: &AppState, id: DbId) -> AppResult<Asset> {
    state
        .data
        .find_asset(id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Asset", id }.into())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/assets
pub async fn list_assets(
    State(state): State<AppState>,
    Query(params): Query<AssetListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = AssetFilter {
        provider: params.provider.clone(),
        status: params.status,
    };
    let mut session = AssetSession::new(filter);
    session.refresh(state.data.as_ref()).await?;

    let query = ViewQuery {
        search: params.search,
        status: params.status,
        provider: params.provider,
        designer_id: params.designer_id,
        sort: params.sort.unwrap_or_default(),
        descending: params.descending,
    };
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT) as usize;
    let offset = clamp_offset(params.offset) as usize;

    let rows: Vec<Asset> = session
        .view(&query)
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/assets/{id}
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = load_asset(&state, id).await?;
    Ok(Json(DataResponse { data: asset }))
}

/// POST /api/v1/assets
///
/// Refuses the insert with 409 when a record with the same normalized game
/// name already exists for the provider. The body carries the matched record
/// and the selected brands it still lacks, so the caller can merge them
/// through `/assets/batch/commit` instead.
pub async fn create_asset(
    State(state): State<AppState>,
    Json(input): Json<NewAsset>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    input.check_names()?;

    let filter = AssetFilter {
        provider: Some(input.provider.clone()),
        status: None,
    };
    let existing = state.data.list_assets(&filter).await?;
    if let Some(dup) = find_duplicate(&input.game_name, &input.provider, &existing) {
        let new_brand_ids: Vec<DbId> = input
            .brand_ids
            .iter()
            .copied()
            .filter(|&id| !dup.has_brand(id))
            .collect();
        return Err(AppError::Duplicate(DuplicateMatch {
            candidate: input.game_name.trim().to_string(),
            asset_id: dup.id,
            existing_game_name: dup.game_name.clone(),
            new_brand_ids,
        }));
    }

    let asset = state.data.create_asset(&input).await?;
    tracing::info!(asset_id = asset.id, game = %asset.game_name, "Asset created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}

/// DELETE /api/v1/assets/{id}
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if state.data.delete_asset(id).await? {
        tracing::info!(asset_id = id, "Asset deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound { entity: "Asset", id }.into())
    }
}

/// PUT /api/v1/assets/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<StatusBody>,
) -> AppResult<impl IntoResponse> {
    state.data.update_status(id, body.status).await?;
    let asset = load_asset(&state, id).await?;
    Ok(Json(DataResponse { data: asset }))
}

/// PUT /api/v1/assets/{id}/designer
pub async fn update_designer(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<DesignerBody>,
) -> AppResult<impl IntoResponse> {
    state.data.update_designer(id, body.designer_id).await?;
    let asset = load_asset(&state, id).await?;
    Ok(Json(DataResponse { data: asset }))
}

/// PUT /api/v1/assets/{id}/brands/{brand_id}
///
/// Marks an attached brand as reflected (or not) for the asset.
pub async fn set_brand_reflected(
    State(state): State<AppState>,
    Path((id, brand_id)): Path<(DbId, DbId)>,
    Json(body): Json<ReflectedBody>,
) -> AppResult<impl IntoResponse> {
    let reflected_by = body
        .reflected_by
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    state
        .data
        .set_reflected(id, brand_id, body.reflected, reflected_by)
        .await?;
    let asset = load_asset(&state, id).await?;
    Ok(Json(DataResponse { data: asset }))
}

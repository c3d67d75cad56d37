//! Public read-only API consumed by external tools.
//!
//! Responses use their own flat shapes (not the `{ "data": ... }` admin
//! envelope) and errors are reported as `{error, details}`.

use assetboard_core::error::CoreError;
use assetboard_core::models::{Asset, AssetFilter, AssetStatus};
use assetboard_core::normalize::compact_name;
use assetboard_core::types::DbId;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error body of the public API.
#[derive(Debug)]
pub struct PublicError {
    status: StatusCode,
    error: &'static str,
    details: String,
}

impl PublicError {
    fn from_core(err: CoreError, context: &'static str) -> Self {
        let status = match &err {
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => {
                tracing::error!(error = %err, context, "Public API call failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            error: context,
            details: err.to_string(),
        }
    }
}

impl IntoResponse for PublicError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.error,
            "details": self.details,
        });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct PublicAssetParams {
    pub provider: Option<String>,
    pub status: Option<String>,
    /// Cap on the number of rows returned; `count` still reports every match.
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PublicAsset {
    pub game_name: String,
    /// Lowercase alphanumeric-only form of `game_name`.
    pub gamename: String,
    pub provider: String,
    pub status: AssetStatus,
}

impl From<Asset> for PublicAsset {
    fn from(asset: Asset) -> Self {
        Self {
            gamename: compact_name(&asset.game_name),
            game_name: asset.game_name,
            provider: asset.provider,
            status: asset.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicAssetList {
    pub count: usize,
    pub returned: usize,
    pub data: Vec<PublicAsset>,
}

/// GET /api/assets?provider=&status=&limit=
pub async fn list_assets(
    State(state): State<AppState>,
    Query(params): Query<PublicAssetParams>,
) -> Result<Json<PublicAssetList>, PublicError> {
    let status = params
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(AssetStatus::from_str_value)
        .transpose()
        .map_err(|msg| PublicError::from_core(CoreError::Validation(msg), "Invalid status"))?;
    let filter = AssetFilter {
        provider: params
            .provider
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()),
        status,
    };

    let assets = state
        .data
        .list_assets(&filter)
        .await
        .map_err(|err| PublicError::from_core(err, "Failed to fetch assets"))?;

    let count = assets.len();
    let data: Vec<PublicAsset> = assets
        .into_iter()
        .take(params.limit.unwrap_or(usize::MAX))
        .map(PublicAsset::from)
        .collect();

    Ok(Json(PublicAssetList {
        count,
        returned: data.len(),
        data,
    }))
}

// ---------------------------------------------------------------------------
// Providers
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PublicProvider {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PublicProviderList {
    pub count: usize,
    pub data: Vec<PublicProvider>,
}

/// GET /api/providers
pub async fn list_providers(
    State(state): State<AppState>,
) -> Result<Json<PublicProviderList>, PublicError> {
    let providers = state
        .data
        .list_providers()
        .await
        .map_err(|err| PublicError::from_core(err, "Failed to fetch providers"))?;

    let data: Vec<PublicProvider> = providers
        .into_iter()
        .map(|p| PublicProvider {
            id: p.id,
            name: p.name,
        })
        .collect();
    Ok(Json(PublicProviderList {
        count: data.len(),
        data,
    }))
}

// ---------------------------------------------------------------------------
// Method handling
// ---------------------------------------------------------------------------

/// OPTIONS on a public route outside a CORS preflight.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any method other than GET/OPTIONS.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({
            "error": "Method not allowed",
            "details": "Only GET is supported",
        })),
    )
        .into_response()
}

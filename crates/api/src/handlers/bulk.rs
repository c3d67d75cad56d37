//! Handlers for bulk asset operations: batch add with duplicate resolution,
//! batch delete, text-match update and range edit.

use std::collections::HashSet;

use assetboard_core::duplicates::{
    commit_batch, detect_live, resolve_batch, BatchTemplate, CommitSummary, DuplicateMatch,
};
use assetboard_core::error::CoreError;
use assetboard_core::models::{Asset, AssetFilter};
use assetboard_core::normalize::candidate_lines;
use assetboard_core::pagination::Page;
use assetboard_core::range_edit::{apply_range_edit, select_range, DragField, RangeEditSummary};
use assetboard_core::session::{AssetSession, ViewQuery};
use assetboard_core::summary::BulkOutcome;
use assetboard_core::text_match::{run_text_match, TextMatchRequest};
use assetboard_core::types::DbId;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::{DataResponse, SummaryResponse};
use crate::state::AppState;

/// Load a session scoped to one provider (or everything when `None`).
async fn load_session(state: &AppState, provider: Option<&str>) -> AppResult<AssetSession> {
    let filter = AssetFilter {
        provider: provider.map(str::to_string),
        status: None,
    };
    let mut session = AssetSession::new(filter);
    session.refresh(state.data.as_ref()).await?;
    Ok(session)
}

// ---------------------------------------------------------------------------
// Batch add
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct BatchPreviewRequest {
    pub text: String,
    pub provider: Option<String>,
    #[serde(default)]
    pub brand_ids: Vec<DbId>,
    /// Zero-based page of the duplicate list.
    #[serde(default)]
    pub page: usize,
}

#[derive(Debug, Serialize)]
pub struct BatchPreview {
    pub provider: String,
    pub candidate_count: usize,
    pub new_titles: Vec<String>,
    pub duplicates: Page<DuplicateMatch>,
    /// True when committing would change nothing.
    pub nothing_to_add: bool,
}

/// POST /api/v1/assets/batch/preview
///
/// Live duplicate detection. Returns `{"data": null}` until a provider is
/// chosen.
pub async fn preview_batch(
    State(state): State<AppState>,
    Json(body): Json<BatchPreviewRequest>,
) -> AppResult<impl IntoResponse> {
    let provider = body
        .provider
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());
    let Some(provider) = provider else {
        return Ok(Json(DataResponse::<Option<BatchPreview>> { data: None }));
    };

    let session = load_session(&state, Some(provider)).await?;
    let preview = detect_live(&body.text, Some(provider), &body.brand_ids, session.assets()).map(
        |resolution| BatchPreview {
            provider: resolution.provider.clone(),
            candidate_count: resolution.candidate_count(),
            nothing_to_add: resolution.nothing_to_add(),
            duplicates: resolution.duplicates_page(body.page),
            new_titles: resolution.new_titles,
        },
    );
    Ok(Json(DataResponse { data: preview }))
}

#[derive(Debug, Deserialize)]
pub struct BatchCommitRequest {
    pub text: String,
    pub provider: String,
    #[serde(default)]
    pub brand_ids: Vec<DbId>,
    /// Field values for the inserted records.
    #[serde(default)]
    pub template: BatchTemplate,
}

fn commit_message(summary: &CommitSummary) -> String {
    format!(
        "{} added, {} updated, {} skipped, {} failed",
        summary.created.len(),
        summary.updated,
        summary.skipped,
        summary.failures.len()
    )
}

/// POST /api/v1/assets/batch/commit
///
/// Resolves the pasted titles against current data, inserts the new ones
/// and attaches missing brands to the duplicates.
pub async fn commit_batch_add(
    State(state): State<AppState>,
    Json(body): Json<BatchCommitRequest>,
) -> AppResult<impl IntoResponse> {
    let provider = body.provider.trim();
    if provider.is_empty() {
        return Err(CoreError::Validation("A provider is required".to_string()).into());
    }
    if candidate_lines(&body.text).is_empty() {
        return Err(CoreError::Validation("At least one title is required".to_string()).into());
    }

    let session = load_session(&state, Some(provider)).await?;
    let resolution = resolve_batch(&body.text, provider, &body.brand_ids, session.assets());
    let summary = commit_batch(state.data.as_ref(), &resolution, &body.template).await?;

    Ok(Json(DataResponse {
        data: SummaryResponse {
            message: commit_message(&summary),
            summary,
        },
    }))
}

// ---------------------------------------------------------------------------
// Batch delete
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct BatchDeleteRequest {
    pub ids: Vec<DbId>,
}

#[derive(Debug, Serialize)]
pub struct BatchDeleteSummary {
    pub deleted: usize,
    pub not_found: Vec<DbId>,
    pub failed: Vec<DbId>,
    pub outcome: BulkOutcome,
}

/// POST /api/v1/assets/batch-delete
pub async fn batch_delete(
    State(state): State<AppState>,
    Json(body): Json<BatchDeleteRequest>,
) -> AppResult<impl IntoResponse> {
    let mut seen = HashSet::new();
    let ids: Vec<DbId> = body.ids.into_iter().filter(|id| seen.insert(*id)).collect();

    let data = state.data.as_ref();
    let results = join_all(ids.iter().map(|&id| async move {
        let result = data.delete_asset(id).await;
        if let Err(err) = &result {
            tracing::warn!(asset_id = id, error = %err, "Batch delete failed");
        }
        (id, result)
    }))
    .await;

    let mut deleted = 0;
    let mut not_found = Vec::new();
    let mut failed = Vec::new();
    for (id, result) in results {
        match result {
            Ok(true) => deleted += 1,
            Ok(false) => not_found.push(id),
            Err(_) => failed.push(id),
        }
    }
    tracing::info!(deleted, failed = failed.len(), "Batch delete finished");

    let summary = BatchDeleteSummary {
        deleted,
        outcome: BulkOutcome::from_counts(deleted, failed.len()),
        not_found,
        failed,
    };
    Ok(Json(DataResponse {
        data: SummaryResponse {
            message: format!("{} deleted, {} failed", summary.deleted, summary.failed.len()),
            summary,
        },
    }))
}

// ---------------------------------------------------------------------------
// Text-match update
// ---------------------------------------------------------------------------

/// Summary of a bulk edit together with the affected records as they stand
/// afterwards, so a client can replace its local copies.
#[derive(Debug, Serialize)]
pub struct BulkEditResult<S> {
    #[serde(flatten)]
    pub summary: S,
    pub assets: Vec<Asset>,
}

/// POST /api/v1/assets/bulk-update
pub async fn text_match_update(
    State(state): State<AppState>,
    Json(body): Json<TextMatchRequest>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;

    let mut session = load_session(&state, Some(&body.provider)).await?;
    let summary = run_text_match(&mut session, state.data.as_ref(), &body).await?;
    let assets = session.records(&summary.asset_ids);

    Ok(Json(DataResponse {
        data: SummaryResponse {
            message: summary.message(),
            summary: BulkEditResult { summary, assets },
        },
    }))
}

// ---------------------------------------------------------------------------
// Range edit
// ---------------------------------------------------------------------------

/// A released drag over a view.
///
/// The row order comes from `asset_ids` when the client supplies its
/// rendered snapshot, otherwise from `view` evaluated against fresh data.
#[derive(Debug, Deserialize)]
pub struct RangeEditRequest {
    pub asset_ids: Option<Vec<DbId>>,
    #[serde(default)]
    pub view: ViewQuery,
    pub start: usize,
    pub end: usize,
    pub edit: DragField,
}

/// POST /api/v1/assets/range-edit
///
/// The response lists the selected records as held after the edit: the
/// written values on success, source data when a failure forced a re-fetch.
pub async fn range_edit(
    State(state): State<AppState>,
    Json(body): Json<RangeEditRequest>,
) -> AppResult<impl IntoResponse> {
    let mut session = load_session(&state, None).await?;
    let snapshot = match body.asset_ids {
        Some(ids) => ids,
        None => session.view_ids(&body.view),
    };
    if body.start >= snapshot.len() && !snapshot.is_empty() {
        return Err(CoreError::Validation(format!(
            "Drag start row {} is outside a view of {} rows",
            body.start,
            snapshot.len()
        ))
        .into());
    }

    let (summary, assets) = match select_range(&snapshot, body.start, body.end, body.edit) {
        Some(selection) => {
            let summary = apply_range_edit(&mut session, state.data.as_ref(), &selection).await;
            (summary, session.records(&selection.asset_ids))
        }
        None => (
            RangeEditSummary {
                saved: 0,
                failed: 0,
                reconciled: false,
                outcome: BulkOutcome::NothingToDo,
            },
            Vec::new(),
        ),
    };

    Ok(Json(DataResponse {
        data: SummaryResponse {
            message: summary.message(),
            summary: BulkEditResult { summary, assets },
        },
    }))
}

//! Handlers for standalone text utilities.

use assetboard_core::normalize::convert_titles;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct ConvertTitlesRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ConvertedTitles {
    pub titles: Vec<String>,
    /// `titles` joined with newlines, ready to paste back.
    pub text: String,
}

/// POST /api/v1/tools/convert-titles
///
/// Converts each line to its lowercase alphanumeric-only form.
pub async fn convert(Json(body): Json<ConvertTitlesRequest>) -> AppResult<impl IntoResponse> {
    let titles = convert_titles(&body.text);
    let text = titles.join("\n");
    Ok(Json(DataResponse {
        data: ConvertedTitles { titles, text },
    }))
}

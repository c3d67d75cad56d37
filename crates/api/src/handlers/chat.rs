//! Handler for the AI assistant.

use assetboard_core::chat::{build_system_prompt, validate_transcript, ChatMessage, DataSnapshot};
use assetboard_core::error::CoreError;
use assetboard_core::models::AssetFilter;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// POST /api/v1/chat
///
/// Answers the last user message using a snapshot of current data.
/// Nothing from the conversation is stored.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> AppResult<impl IntoResponse> {
    let client = state.chat.clone().ok_or_else(|| {
        CoreError::NotConfigured("CHAT_API_KEY is not set; the assistant is unavailable".into())
    })?;
    validate_transcript(&body.messages)?;

    let data = state.data.as_ref();
    let filter = AssetFilter::default();
    let (assets, providers, brands, designers) = futures::try_join!(
        data.list_assets(&filter),
        data.list_providers(),
        data.list_brands(),
        data.list_designers(),
    )?;

    let system = build_system_prompt(&DataSnapshot {
        assets: &assets,
        providers: &providers,
        brands: &brands,
        designers: &designers,
    });
    let reply = client.complete(&system, &body.messages).await?;
    tracing::info!(
        messages = body.messages.len(),
        reply_len = reply.len(),
        "Chat answered"
    );

    Ok(Json(DataResponse {
        data: ChatReply { reply },
    }))
}

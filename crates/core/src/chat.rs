//! AI assistant prompt construction.
//!
//! The assistant answers questions about the tracker's data. Each request
//! carries a system prompt embedding a snapshot of the catalog and the asset
//! records; nothing from the conversation is stored.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::{Asset, AssetStatus, Brand, Designer, Provider};
use crate::types::DbId;

/// Asset rows embedded in the prompt beyond this are summarized by count.
pub const MAX_PROMPT_ASSETS: usize = 500;

/// Maximum number of messages accepted in one transcript.
pub const MAX_TRANSCRIPT_MESSAGES: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Check a transcript before it is forwarded upstream.
///
/// It must be non-empty, bounded, and end with a user message.
pub fn validate_transcript(messages: &[ChatMessage]) -> Result<(), CoreError> {
    let Some(last) = messages.last() else {
        return Err(CoreError::Validation("Chat transcript is empty".to_string()));
    };
    if messages.len() > MAX_TRANSCRIPT_MESSAGES {
        return Err(CoreError::Validation(format!(
            "Chat transcript exceeds {MAX_TRANSCRIPT_MESSAGES} messages"
        )));
    }
    if last.role != ChatRole::User {
        return Err(CoreError::Validation(
            "The last chat message must come from the user".to_string(),
        ));
    }
    if messages.iter().any(|m| m.content.trim().is_empty()) {
        return Err(CoreError::Validation("Chat messages must not be blank".to_string()));
    }
    Ok(())
}

/// Everything the assistant gets to see.
#[derive(Debug, Clone, Copy)]
pub struct DataSnapshot<'a> {
    pub assets: &'a [Asset],
    pub providers: &'a [Provider],
    pub brands: &'a [Brand],
    pub designers: &'a [Designer],
}

/// Build the system prompt for one chat request.
pub fn build_system_prompt(snapshot: &DataSnapshot<'_>) -> String {
    let designer_names: HashMap<DbId, &str> = snapshot
        .designers
        .iter()
        .map(|d| (d.id, d.name.as_str()))
        .collect();

    let mut prompt = String::from(
        "You are the assistant of a missing game asset tracker for an online casino operator. \
         Answer questions using only the data below. When counting, count exactly; \
         when the data does not contain the answer, say so.\n",
    );

    let _ = writeln!(prompt, "\n## Status counts");
    for status in [
        AssetStatus::NotStarted,
        AssetStatus::Ongoing,
        AssetStatus::Completed,
        AssetStatus::Exported,
        AssetStatus::Uploaded,
    ] {
        let count = snapshot.assets.iter().filter(|a| a.status == status).count();
        let _ = writeln!(prompt, "- {status}: {count}");
    }

    let _ = writeln!(prompt, "\n## Providers ({})", snapshot.providers.len());
    for p in snapshot.providers {
        let _ = writeln!(prompt, "- {}", p.name);
    }

    let _ = writeln!(prompt, "\n## Brands ({})", snapshot.brands.len());
    for b in snapshot.brands {
        let _ = writeln!(prompt, "- {}", b.name);
    }

    let _ = writeln!(prompt, "\n## Designers ({})", snapshot.designers.len());
    for d in snapshot.designers {
        let _ = writeln!(prompt, "- {}", d.name);
    }

    let _ = writeln!(prompt, "\n## Assets ({})", snapshot.assets.len());
    let _ = writeln!(prompt, "game | provider | status | designer | brands (reflected)");
    for a in snapshot.assets.iter().take(MAX_PROMPT_ASSETS) {
        let designer = a
            .designer_id
            .and_then(|id| designer_names.get(&id).copied())
            .unwrap_or("unassigned");
        let brands = a
            .brands
            .iter()
            .map(|b| {
                if b.reflected {
                    format!("{} (yes)", b.name)
                } else {
                    format!("{} (no)", b.name)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            prompt,
            "{} | {} | {} | {} | {}",
            a.game_name, a.provider, a.status, designer, brands
        );
    }
    if snapshot.assets.len() > MAX_PROMPT_ASSETS {
        let _ = writeln!(
            prompt,
            "... {} more assets not listed",
            snapshot.assets.len() - MAX_PROMPT_ASSETS
        );
    }

    prompt
}

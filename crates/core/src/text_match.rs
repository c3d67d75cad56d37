//! Bulk status/designer update driven by a pasted list of titles.
//!
//! Matching is scoped to one provider and uses normalized game names. Only
//! matched records are touched; unmatched titles are reported back.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::gateway::AssetGateway;
use crate::models::{Asset, AssetStatus, DesignerChange};
use crate::normalize::{candidate_lines, normalize_name, same_provider};
use crate::session::AssetSession;
use crate::summary::BulkOutcome;
use crate::types::DbId;

/// Input of one text-match run.
#[derive(Debug, Clone, Deserialize)]
pub struct TextMatchRequest {
    pub provider: String,
    /// Newline-separated titles.
    pub titles: String,
    pub status: AssetStatus,
    #[serde(default)]
    pub designer: DesignerChange,
}

impl TextMatchRequest {
    /// Reject missing provider or empty title list before any remote call.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.provider.trim().is_empty() {
            return Err(CoreError::Validation("A provider is required".to_string()));
        }
        if candidate_lines(&self.titles).is_empty() {
            return Err(CoreError::Validation("At least one title is required".to_string()));
        }
        Ok(())
    }
}

/// A pasted title resolved to an existing record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleMatch {
    pub title: String,
    pub asset_id: DbId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TitlePartition {
    pub matched: Vec<TitleMatch>,
    pub missing: Vec<String>,
}

/// Split `titles` into those with a record under `provider` and those without.
///
/// Titles repeated within the paste (same normalized key) collapse to their
/// first occurrence, so each record is updated at most once.
pub fn partition_titles(provider: &str, titles: &str, assets: &[Asset]) -> TitlePartition {
    let mut lookup: HashMap<String, DbId> = HashMap::new();
    for asset in assets.iter().filter(|a| same_provider(&a.provider, provider)) {
        lookup
            .entry(normalize_name(&asset.game_name))
            .or_insert(asset.id);
    }

    let mut seen = HashSet::new();
    let mut partition = TitlePartition::default();
    for title in candidate_lines(titles) {
        let key = normalize_name(title);
        if !seen.insert(key.clone()) {
            continue;
        }
        match lookup.get(&key) {
            Some(&asset_id) => partition.matched.push(TitleMatch {
                title: title.to_string(),
                asset_id,
            }),
            None => partition.missing.push(title.to_string()),
        }
    }
    partition
}

/// Per-record result of the status/designer pair.
#[derive(Debug, Clone, Copy)]
struct RecordResult {
    asset_id: DbId,
    status_ok: bool,
    /// `None` when no designer update was attempted.
    designer_ok: Option<bool>,
}

/// Summary of one text-match run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMatchSummary {
    pub matched: usize,
    /// Records the titles resolved to, in paste order.
    pub asset_ids: Vec<DbId>,
    pub status_updated: usize,
    /// `None` when no designer change was requested.
    pub designer_updated: Option<usize>,
    pub missing: Vec<String>,
    /// True only when every title matched; otherwise the input is kept for
    /// correction.
    pub clear_input: bool,
    pub outcome: BulkOutcome,
}

impl TextMatchSummary {
    pub fn message(&self) -> String {
        let mut parts = vec![format!("{} status updated", self.status_updated)];
        if let Some(designers) = self.designer_updated {
            parts.push(format!("{designers} designer updated"));
        }
        if !self.missing.is_empty() {
            parts.push(format!("{} not found", self.missing.len()));
        }
        parts.join(", ")
    }
}

/// Run the text-match updater against `session` and persist through `gateway`.
///
/// Each matched record gets a status update; a designer update follows only
/// when requested and the status update succeeded. Records are processed
/// concurrently. Successful writes are mirrored into the session.
pub async fn run_text_match<G>(
    session: &mut AssetSession,
    gateway: &G,
    request: &TextMatchRequest,
) -> Result<TextMatchSummary, CoreError>
where
    G: AssetGateway + ?Sized,
{
    request.validate()?;

    let partition = partition_titles(&request.provider, &request.titles, session.assets());
    let designer_target = request.designer.target();
    let status = request.status;

    let work = partition.matched.iter().map(|m| {
        let asset_id = m.asset_id;
        async move {
            let status_ok = match gateway.update_status(asset_id, status).await {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(asset_id, error = %err, "Status update failed");
                    false
                }
            };
            let designer_ok = match designer_target {
                Some(designer_id) if status_ok => {
                    match gateway.update_designer(asset_id, designer_id).await {
                        Ok(()) => Some(true),
                        Err(err) => {
                            tracing::warn!(asset_id, error = %err, "Designer update failed");
                            Some(false)
                        }
                    }
                }
                Some(_) => Some(false),
                None => None,
            };
            RecordResult {
                asset_id,
                status_ok,
                designer_ok,
            }
        }
    });
    let results = join_all(work).await;

    let mut status_updated = 0;
    let mut designer_updated = 0;
    for r in &results {
        if r.status_ok {
            status_updated += 1;
            session.set_status(r.asset_id, status);
        }
        if r.designer_ok == Some(true) {
            designer_updated += 1;
            if let Some(designer_id) = designer_target {
                session.set_designer(r.asset_id, designer_id);
            }
        }
    }

    let failed = results.len() - status_updated;
    let clear_input = partition.missing.is_empty();

    tracing::info!(
        provider = %request.provider,
        matched = results.len(),
        status_updated,
        designer_updated,
        missing = partition.missing.len(),
        "Text-match update finished",
    );

    Ok(TextMatchSummary {
        matched: results.len(),
        asset_ids: results.iter().map(|r| r.asset_id).collect(),
        status_updated,
        designer_updated: designer_target.map(|_| designer_updated),
        missing: partition.missing,
        clear_input,
        outcome: BulkOutcome::from_counts(status_updated, failed),
    })
}

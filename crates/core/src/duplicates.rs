//! Duplicate-aware asset ingestion.
//!
//! Candidates are compared to existing assets by normalized game name and
//! case-insensitive provider. Exact equality only; the first match in
//! iteration order wins when the store already holds duplicates.

use std::collections::HashSet;

use chrono::NaiveDate;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::gateway::AssetGateway;
use crate::models::{Asset, AssetStatus, NewAsset};
use crate::normalize::{candidate_lines, normalize_name, same_provider};
use crate::pagination::{paginate, Page, LIVE_PAGE_SIZE};
use crate::summary::BulkOutcome;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Single lookup
// ---------------------------------------------------------------------------

/// Return the first asset with the same normalized `(game_name, provider)`.
pub fn find_duplicate<'a>(
    game_name: &str,
    provider: &str,
    assets: &'a [Asset],
) -> Option<&'a Asset> {
    let key = normalize_name(game_name);
    if key.is_empty() {
        return None;
    }
    assets
        .iter()
        .find(|a| same_provider(&a.provider, provider) && normalize_name(&a.game_name) == key)
}

// ---------------------------------------------------------------------------
// Batch resolution
// ---------------------------------------------------------------------------

/// A candidate that already exists, with the brands it still lacks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateMatch {
    /// The candidate as typed (trimmed).
    pub candidate: String,
    pub asset_id: DbId,
    pub existing_game_name: String,
    /// Selected brands not yet attached to the existing asset.
    pub new_brand_ids: Vec<DbId>,
}

impl DuplicateMatch {
    pub fn has_additions(&self) -> bool {
        !self.new_brand_ids.is_empty()
    }
}

/// Partition of a pasted block into new titles and duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResolution {
    pub provider: String,
    pub brand_ids: Vec<DbId>,
    pub new_titles: Vec<String>,
    pub duplicates: Vec<DuplicateMatch>,
}

impl BatchResolution {
    /// True when committing would neither insert nor attach anything, e.g. a
    /// single duplicate whose selected brands are all attached already.
    pub fn nothing_to_add(&self) -> bool {
        self.new_titles.is_empty() && !self.duplicates.iter().any(DuplicateMatch::has_additions)
    }

    pub fn candidate_count(&self) -> usize {
        self.new_titles.len() + self.duplicates.len()
    }

    /// Page `page` of the duplicate list, [`LIVE_PAGE_SIZE`] per page.
    pub fn duplicates_page(&self, page: usize) -> Page<DuplicateMatch> {
        paginate(&self.duplicates, page, LIVE_PAGE_SIZE)
    }
}

/// Resolve every line of `text` against `assets` for one provider.
///
/// Blank lines are skipped and repeated candidates (same normalized name)
/// collapse to their first occurrence.
pub fn resolve_batch(
    text: &str,
    provider: &str,
    brand_ids: &[DbId],
    assets: &[Asset],
) -> BatchResolution {
    let mut selected: Vec<DbId> = Vec::with_capacity(brand_ids.len());
    for &id in brand_ids {
        if !selected.contains(&id) {
            selected.push(id);
        }
    }

    let mut seen = HashSet::new();
    let mut new_titles = Vec::new();
    let mut duplicates = Vec::new();

    for candidate in candidate_lines(text) {
        if !seen.insert(normalize_name(candidate)) {
            continue;
        }
        match find_duplicate(candidate, provider, assets) {
            Some(existing) => duplicates.push(DuplicateMatch {
                candidate: candidate.to_string(),
                asset_id: existing.id,
                existing_game_name: existing.game_name.clone(),
                new_brand_ids: selected
                    .iter()
                    .copied()
                    .filter(|&id| !existing.has_brand(id))
                    .collect(),
            }),
            None => new_titles.push(candidate.to_string()),
        }
    }

    BatchResolution {
        provider: provider.trim().to_string(),
        brand_ids: selected,
        new_titles,
        duplicates,
    }
}

/// Live detection for a multi-line input field.
///
/// Returns `None` until a provider has been chosen.
pub fn detect_live(
    text: &str,
    provider: Option<&str>,
    brand_ids: &[DbId],
    assets: &[Asset],
) -> Option<BatchResolution> {
    let provider = provider.map(str::trim).filter(|p| !p.is_empty())?;
    Some(resolve_batch(text, provider, brand_ids, assets))
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

/// Field values applied to every newly inserted asset of a batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchTemplate {
    #[serde(default)]
    pub status: AssetStatus,
    pub designer_id: Option<DbId>,
    pub found_by: Option<String>,
    pub date_found: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// One failed insert or brand update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitFailure {
    pub title: String,
    pub error: String,
}

/// Result of committing a [`BatchResolution`].
#[derive(Debug, Clone, Serialize)]
pub struct CommitSummary {
    pub created: Vec<Asset>,
    /// Duplicates that received new brands.
    pub updated: usize,
    /// Duplicates skipped because their brand delta was empty.
    pub skipped: usize,
    pub failures: Vec<CommitFailure>,
    pub outcome: BulkOutcome,
}

/// Insert every new title and attach brand deltas to duplicates.
///
/// Inserts are unconditional; duplicates with an empty delta are skipped.
/// All calls are issued concurrently and awaited together.
pub async fn commit_batch<G>(
    gateway: &G,
    resolution: &BatchResolution,
    template: &BatchTemplate,
) -> Result<CommitSummary, CoreError>
where
    G: AssetGateway + ?Sized,
{
    if resolution.provider.trim().is_empty() {
        return Err(CoreError::Validation("A provider is required".to_string()));
    }

    let inserts = resolution.new_titles.iter().map(|title| {
        let input = NewAsset {
            game_name: title.clone(),
            provider: resolution.provider.clone(),
            brand_ids: resolution.brand_ids.clone(),
            status: template.status,
            designer_id: template.designer_id,
            found_by: template.found_by.clone(),
            date_found: template.date_found,
            notes: template.notes.clone(),
        };
        async move { (title, gateway.create_asset(&input).await) }
    });

    let actionable: Vec<&DuplicateMatch> = resolution
        .duplicates
        .iter()
        .filter(|d| d.has_additions())
        .collect();
    let skipped = resolution.duplicates.len() - actionable.len();

    let updates = actionable.iter().map(|&dup| async move {
        (
            &dup.candidate,
            gateway.attach_brands(dup.asset_id, &dup.new_brand_ids).await,
        )
    });

    let (insert_results, update_results) = futures::join!(join_all(inserts), join_all(updates));

    let mut created = Vec::new();
    let mut failures = Vec::new();
    for (title, result) in insert_results {
        match result {
            Ok(asset) => created.push(asset),
            Err(err) => {
                tracing::warn!(title = %title, error = %err, "Batch insert failed");
                failures.push(CommitFailure {
                    title: title.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    let mut updated = 0;
    for (title, result) in update_results {
        match result {
            Ok(()) => updated += 1,
            Err(err) => {
                tracing::warn!(title = %title, error = %err, "Brand delta update failed");
                failures.push(CommitFailure {
                    title: title.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    let outcome = BulkOutcome::from_counts(created.len() + updated, failures.len());
    tracing::info!(
        inserted = created.len(),
        updated,
        skipped,
        failed = failures.len(),
        "Batch committed",
    );

    Ok(CommitSummary {
        created,
        updated,
        skipped,
        failures,
        outcome,
    })
}

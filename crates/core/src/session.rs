//! In-memory asset store for one editing session.
//!
//! Holds the last snapshot fetched from the gateway, applies optimistic and
//! confirmed mutations, and derives the filtered/sorted views the range
//! editor operates on.

use serde::Deserialize;

use crate::error::CoreError;
use crate::gateway::AssetGateway;
use crate::models::{Asset, AssetFilter, AssetStatus};
use crate::normalize::{normalize_name, same_provider};
use crate::types::DbId;

/// Column a view is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    GameName,
    Provider,
    Status,
    CreatedAt,
    UpdatedAt,
}

/// Display-side filter and ordering.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewQuery {
    /// Substring match against normalized game name or provider.
    pub search: Option<String>,
    pub status: Option<AssetStatus>,
    pub provider: Option<String>,
    pub designer_id: Option<DbId>,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub descending: bool,
}

impl ViewQuery {
    fn matches(&self, asset: &Asset, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            let hit = normalize_name(&asset.game_name).contains(needle)
                || normalize_name(&asset.provider).contains(needle);
            if !hit {
                return false;
            }
        }
        if self.status.is_some_and(|s| s != asset.status) {
            return false;
        }
        if let Some(provider) = &self.provider {
            if !same_provider(provider, &asset.provider) {
                return false;
            }
        }
        if self.designer_id.is_some() && self.designer_id != asset.designer_id {
            return false;
        }
        true
    }
}

/// The authoritative in-memory asset list of a session.
#[derive(Debug, Clone, Default)]
pub struct AssetSession {
    filter: AssetFilter,
    assets: Vec<Asset>,
}

impl AssetSession {
    /// An empty session that will sync records matching `filter`.
    pub fn new(filter: AssetFilter) -> Self {
        Self {
            filter,
            assets: Vec::new(),
        }
    }

    /// A session seeded with an existing snapshot.
    pub fn with_assets(filter: AssetFilter, assets: Vec<Asset>) -> Self {
        Self { filter, assets }
    }

    /// Fetch a fresh snapshot from the gateway, replacing local state.
    ///
    /// On error the local state is left unchanged.
    pub async fn refresh<G>(&mut self, gateway: &G) -> Result<(), CoreError>
    where
        G: AssetGateway + ?Sized,
    {
        let assets = gateway.list_assets(&self.filter).await?;
        tracing::debug!(count = assets.len(), "Asset session refreshed");
        self.assets = assets;
        Ok(())
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn get(&self, id: DbId) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Clones of the records with the given ids, in `ids` order. Unknown ids
    /// are skipped.
    pub fn records(&self, ids: &[DbId]) -> Vec<Asset> {
        ids.iter().filter_map(|&id| self.get(id)).cloned().collect()
    }

    /// Filtered and sorted view. Ties break on id so the order is stable.
    pub fn view(&self, query: &ViewQuery) -> Vec<&Asset> {
        let needle = query
            .search
            .as_deref()
            .map(normalize_name)
            .filter(|n| !n.is_empty());

        let mut rows: Vec<&Asset> = self
            .assets
            .iter()
            .filter(|a| query.matches(a, needle.as_deref()))
            .collect();

        rows.sort_by(|a, b| {
            let ord = match query.sort {
                SortKey::GameName => normalize_name(&a.game_name).cmp(&normalize_name(&b.game_name)),
                SortKey::Provider => normalize_name(&a.provider).cmp(&normalize_name(&b.provider)),
                SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
                SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
                SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            };
            let ord = if query.descending { ord.reverse() } else { ord };
            ord.then(a.id.cmp(&b.id))
        });
        rows
    }

    /// Ids of the rows of [`Self::view`], in display order.
    pub fn view_ids(&self, query: &ViewQuery) -> Vec<DbId> {
        self.view(query).into_iter().map(|a| a.id).collect()
    }

    /// Set the status locally. Returns `false` when the id is unknown.
    pub fn set_status(&mut self, id: DbId, status: AssetStatus) -> bool {
        match self.assets.iter_mut().find(|a| a.id == id) {
            Some(asset) => {
                asset.status = status;
                true
            }
            None => false,
        }
    }

    /// Set or clear the designer locally. Returns `false` when the id is unknown.
    pub fn set_designer(&mut self, id: DbId, designer_id: Option<DbId>) -> bool {
        match self.assets.iter_mut().find(|a| a.id == id) {
            Some(asset) => {
                asset.designer_id = designer_id;
                true
            }
            None => false,
        }
    }

    /// Insert or replace a record by id.
    pub fn upsert(&mut self, asset: Asset) {
        match self.assets.iter_mut().find(|a| a.id == asset.id) {
            Some(existing) => *existing = asset,
            None => self.assets.push(asset),
        }
    }

    pub fn remove(&mut self, id: DbId) -> Option<Asset> {
        let index = self.assets.iter().position(|a| a.id == id)?;
        Some(self.assets.remove(index))
    }
}

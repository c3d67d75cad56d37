//! In-memory gateway.
//!
//! Backs integration tests and local runs without a database. Supports
//! per-asset failure injection so partial-failure paths of the bulk
//! operations can be exercised deterministically.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::gateway::{AssetGateway, CatalogGateway};
use crate::models::{
    Asset, AssetBrand, AssetFilter, AssetStatus, Brand, BrandPatch, Designer, DesignerPatch,
    NewAsset, NewBrand, NewDesigner, NewProvider, Provider,
};
use crate::normalize::same_provider;
use crate::types::DbId;

#[derive(Debug, Default)]
struct MemoryState {
    next_id: DbId,
    assets: Vec<Asset>,
    providers: Vec<Provider>,
    brands: Vec<Brand>,
    designers: Vec<Designer>,
    failing_status: HashSet<DbId>,
    failing_designer: HashSet<DbId>,
    unavailable: bool,
}

impl MemoryState {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn check_available(&self) -> Result<(), CoreError> {
        if self.unavailable {
            return Err(CoreError::Upstream("data source unavailable".to_string()));
        }
        Ok(())
    }

    fn asset_mut(&mut self, id: DbId) -> Result<&mut Asset, CoreError> {
        self.assets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(CoreError::NotFound { entity: "Asset", id })
    }
}

/// Gateway keeping every table in process memory.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: RwLock<MemoryState>,
    list_calls: AtomicUsize,
    designer_calls: AtomicUsize,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make status updates of `id` fail with an upstream error.
    pub async fn fail_status_updates_for(&self, id: DbId) {
        self.state.write().await.failing_status.insert(id);
    }

    /// Make designer updates of `id` fail with an upstream error.
    pub async fn fail_designer_updates_for(&self, id: DbId) {
        self.state.write().await.failing_designer.insert(id);
    }

    /// Make every call fail, as if the remote store were down.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.write().await.unavailable = unavailable;
    }

    /// Number of `list_assets` calls served so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `update_designer` calls received so far.
    pub fn designer_calls(&self) -> usize {
        self.designer_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetGateway for MemoryGateway {
    async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>, CoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.read().await;
        state.check_available()?;
        Ok(state
            .assets
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn find_asset(&self, id: DbId) -> Result<Option<Asset>, CoreError> {
        let state = self.state.read().await;
        state.check_available()?;
        Ok(state.assets.iter().find(|a| a.id == id).cloned())
    }

    async fn create_asset(&self, input: &NewAsset) -> Result<Asset, CoreError> {
        let mut state = self.state.write().await;
        state.check_available()?;

        let brands = input
            .brand_ids
            .iter()
            .map(|&brand_id| {
                state
                    .brands
                    .iter()
                    .find(|b| b.id == brand_id)
                    .map(|b| AssetBrand {
                        brand_id,
                        name: b.name.clone(),
                        color: b.color.clone(),
                        reflected: false,
                        reflected_by: None,
                        reflected_at: None,
                    })
                    .ok_or(CoreError::NotFound {
                        entity: "Brand",
                        id: brand_id,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let now = Utc::now();
        let asset = Asset {
            id: state.next_id(),
            game_name: input.game_name.trim().to_string(),
            provider: input.provider.trim().to_string(),
            brands,
            status: input.status,
            designer_id: input.designer_id,
            found_by: input.found_by.clone(),
            date_found: input.date_found,
            notes: input.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        state.assets.push(asset.clone());
        Ok(asset)
    }

    async fn update_status(&self, id: DbId, status: AssetStatus) -> Result<(), CoreError> {
        let mut state = self.state.write().await;
        state.check_available()?;
        if state.failing_status.contains(&id) {
            return Err(CoreError::Upstream(format!("status update rejected for {id}")));
        }
        let asset = state.asset_mut(id)?;
        asset.status = status;
        asset.updated_at = Utc::now();
        Ok(())
    }

    async fn update_designer(
        &self,
        id: DbId,
        designer_id: Option<DbId>,
    ) -> Result<(), CoreError> {
        self.designer_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().await;
        state.check_available()?;
        if state.failing_designer.contains(&id) {
            return Err(CoreError::Upstream(format!("designer update rejected for {id}")));
        }
        let asset = state.asset_mut(id)?;
        asset.designer_id = designer_id;
        asset.updated_at = Utc::now();
        Ok(())
    }

    async fn attach_brands(&self, id: DbId, brand_ids: &[DbId]) -> Result<(), CoreError> {
        let mut state = self.state.write().await;
        state.check_available()?;

        let mut additions = Vec::new();
        for &brand_id in brand_ids {
            let brand = state
                .brands
                .iter()
                .find(|b| b.id == brand_id)
                .ok_or(CoreError::NotFound {
                    entity: "Brand",
                    id: brand_id,
                })?;
            additions.push(AssetBrand {
                brand_id,
                name: brand.name.clone(),
                color: brand.color.clone(),
                reflected: false,
                reflected_by: None,
                reflected_at: None,
            });
        }

        let asset = state.asset_mut(id)?;
        for brand in additions {
            if !asset.has_brand(brand.brand_id) {
                asset.brands.push(brand);
            }
        }
        asset.updated_at = Utc::now();
        Ok(())
    }

    async fn set_reflected(
        &self,
        asset_id: DbId,
        brand_id: DbId,
        reflected: bool,
        reflected_by: Option<&str>,
    ) -> Result<(), CoreError> {
        let mut state = self.state.write().await;
        state.check_available()?;
        let asset = state.asset_mut(asset_id)?;
        let link = asset
            .brands
            .iter_mut()
            .find(|b| b.brand_id == brand_id)
            .ok_or(CoreError::NotFound {
                entity: "AssetBrand",
                id: brand_id,
            })?;
        link.reflected = reflected;
        if reflected {
            link.reflected_by = reflected_by.map(str::to_string);
            link.reflected_at = Some(Utc::now());
        } else {
            link.reflected_by = None;
            link.reflected_at = None;
        }
        Ok(())
    }

    async fn delete_asset(&self, id: DbId) -> Result<bool, CoreError> {
        let mut state = self.state.write().await;
        state.check_available()?;
        let before = state.assets.len();
        state.assets.retain(|a| a.id != id);
        Ok(state.assets.len() != before)
    }
}

#[async_trait]
impl CatalogGateway for MemoryGateway {
    async fn list_providers(&self) -> Result<Vec<Provider>, CoreError> {
        let state = self.state.read().await;
        state.check_available()?;
        let mut providers = state.providers.clone();
        providers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(providers)
    }

    async fn create_provider(&self, input: &NewProvider) -> Result<Provider, CoreError> {
        let mut state = self.state.write().await;
        state.check_available()?;
        let name = input.name.trim();
        if state.providers.iter().any(|p| same_provider(&p.name, name)) {
            return Err(CoreError::Conflict(format!("Provider '{name}' already exists")));
        }
        let provider = Provider {
            id: state.next_id(),
            name: name.to_string(),
        };
        state.providers.push(provider.clone());
        Ok(provider)
    }

    async fn delete_provider(&self, id: DbId) -> Result<bool, CoreError> {
        let mut state = self.state.write().await;
        state.check_available()?;
        let before = state.providers.len();
        state.providers.retain(|p| p.id != id);
        Ok(state.providers.len() != before)
    }

    async fn list_brands(&self) -> Result<Vec<Brand>, CoreError> {
        let state = self.state.read().await;
        state.check_available()?;
        let mut brands = state.brands.clone();
        brands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(brands)
    }

    async fn create_brand(&self, input: &NewBrand) -> Result<Brand, CoreError> {
        let mut state = self.state.write().await;
        state.check_available()?;
        let brand = Brand {
            id: state.next_id(),
            name: input.name.trim().to_string(),
            color: input.color.clone(),
        };
        state.brands.push(brand.clone());
        Ok(brand)
    }

    async fn update_brand(&self, id: DbId, input: &BrandPatch) -> Result<Option<Brand>, CoreError> {
        let mut state = self.state.write().await;
        state.check_available()?;
        let Some(brand) = state.brands.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            brand.name = name.trim().to_string();
        }
        if let Some(color) = &input.color {
            brand.color = Some(color.clone());
        }
        Ok(Some(brand.clone()))
    }

    async fn delete_brand(&self, id: DbId) -> Result<bool, CoreError> {
        let mut state = self.state.write().await;
        state.check_available()?;
        let before = state.brands.len();
        state.brands.retain(|b| b.id != id);
        let removed = state.brands.len() != before;
        if removed {
            for asset in &mut state.assets {
                asset.brands.retain(|b| b.brand_id != id);
            }
        }
        Ok(removed)
    }

    async fn list_designers(&self) -> Result<Vec<Designer>, CoreError> {
        let state = self.state.read().await;
        state.check_available()?;
        let mut designers = state.designers.clone();
        designers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(designers)
    }

    async fn create_designer(&self, input: &NewDesigner) -> Result<Designer, CoreError> {
        let mut state = self.state.write().await;
        state.check_available()?;
        let designer = Designer {
            id: state.next_id(),
            name: input.name.trim().to_string(),
            avatar: input.avatar.clone(),
            email: input.email.clone(),
        };
        state.designers.push(designer.clone());
        Ok(designer)
    }

    async fn update_designer_profile(
        &self,
        id: DbId,
        input: &DesignerPatch,
    ) -> Result<Option<Designer>, CoreError> {
        let mut state = self.state.write().await;
        state.check_available()?;
        let Some(designer) = state.designers.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            designer.name = name.trim().to_string();
        }
        if let Some(avatar) = &input.avatar {
            designer.avatar = Some(avatar.clone());
        }
        if let Some(email) = &input.email {
            designer.email = Some(email.clone());
        }
        Ok(Some(designer.clone()))
    }

    async fn delete_designer(&self, id: DbId) -> Result<bool, CoreError> {
        let mut state = self.state.write().await;
        state.check_available()?;
        let before = state.designers.len();
        state.designers.retain(|d| d.id != id);
        let removed = state.designers.len() != before;
        if removed {
            for asset in state.assets.iter_mut().filter(|a| a.designer_id == Some(id)) {
                asset.designer_id = None;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn new_asset(game: &str, provider: &str, brand_ids: Vec<DbId>) -> NewAsset {
        NewAsset {
            game_name: game.to_string(),
            provider: provider.to_string(),
            brand_ids,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_attaches_known_brands() {
        let store = MemoryGateway::new();
        let brand = store
            .create_brand(&NewBrand { name: "Casino A".into(), color: None })
            .await
            .unwrap();

        let asset = store
            .create_asset(&new_asset("Sweet Bonanza", "Pragmatic", vec![brand.id]))
            .await
            .unwrap();

        assert_eq!(asset.brands.len(), 1);
        assert!(!asset.brands[0].reflected);
    }

    #[tokio::test]
    async fn create_rejects_unknown_brand() {
        let store = MemoryGateway::new();
        let result = store
            .create_asset(&new_asset("Sweet Bonanza", "Pragmatic", vec![99]))
            .await;
        assert_matches!(result, Err(CoreError::NotFound { entity: "Brand", id: 99 }));
    }

    #[tokio::test]
    async fn injected_status_failure_leaves_record_untouched() {
        let store = MemoryGateway::new();
        let asset = store
            .create_asset(&new_asset("Gates of Olympus", "Pragmatic", vec![]))
            .await
            .unwrap();
        store.fail_status_updates_for(asset.id).await;

        let result = store.update_status(asset.id, AssetStatus::Completed).await;
        assert_matches!(result, Err(CoreError::Upstream(_)));

        let stored = store.find_asset(asset.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AssetStatus::NotStarted);
    }

    #[tokio::test]
    async fn reflection_stamps_and_clears_attribution() {
        let store = MemoryGateway::new();
        let brand = store
            .create_brand(&NewBrand { name: "Casino A".into(), color: None })
            .await
            .unwrap();
        let asset = store
            .create_asset(&new_asset("Sweet Bonanza", "Pragmatic", vec![brand.id]))
            .await
            .unwrap();

        store
            .set_reflected(asset.id, brand.id, true, Some("dana"))
            .await
            .unwrap();
        let stored = store.find_asset(asset.id).await.unwrap().unwrap();
        assert_eq!(stored.brands[0].reflected_by.as_deref(), Some("dana"));
        assert!(stored.brands[0].reflected_at.is_some());

        store.set_reflected(asset.id, brand.id, false, None).await.unwrap();
        let stored = store.find_asset(asset.id).await.unwrap().unwrap();
        assert!(!stored.brands[0].reflected);
        assert!(stored.brands[0].reflected_at.is_none());
    }

    #[tokio::test]
    async fn duplicate_provider_names_conflict() {
        let store = MemoryGateway::new();
        store
            .create_provider(&NewProvider { name: "Pragmatic".into() })
            .await
            .unwrap();
        let again = store
            .create_provider(&NewProvider { name: " pragmatic ".into() })
            .await;
        assert_matches!(again, Err(CoreError::Conflict(_)));
    }
}

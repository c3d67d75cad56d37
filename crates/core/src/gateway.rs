//! Remote data access seam.
//!
//! Bulk operations and HTTP handlers talk to the backing store only through
//! these traits. `assetboard_db` implements them over PostgreSQL, [`crate::memory`]
//! implements them in memory, and [`Unconfigured`] fails every call.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::{
    Asset, AssetFilter, AssetStatus, Brand, BrandPatch, Designer, DesignerPatch, NewAsset,
    NewBrand, NewDesigner, NewProvider, Provider,
};
use crate::types::DbId;

/// Asset records and their brand associations.
#[async_trait]
pub trait AssetGateway: Send + Sync {
    /// Fetch every asset matching `filter`, brands included.
    async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>, CoreError>;

    async fn find_asset(&self, id: DbId) -> Result<Option<Asset>, CoreError>;

    /// Insert an asset and attach `input.brand_ids`.
    async fn create_asset(&self, input: &NewAsset) -> Result<Asset, CoreError>;

    async fn update_status(&self, id: DbId, status: AssetStatus) -> Result<(), CoreError>;

    /// Set (`Some`) or clear (`None`) the designer of an asset.
    async fn update_designer(&self, id: DbId, designer_id: Option<DbId>)
        -> Result<(), CoreError>;

    /// Attach brands (unreflected). Already-attached brands are ignored.
    async fn attach_brands(&self, id: DbId, brand_ids: &[DbId]) -> Result<(), CoreError>;

    /// Set the reflected flag of one attached brand.
    async fn set_reflected(
        &self,
        asset_id: DbId,
        brand_id: DbId,
        reflected: bool,
        reflected_by: Option<&str>,
    ) -> Result<(), CoreError>;

    /// Delete an asset. Returns `false` when nothing was deleted.
    async fn delete_asset(&self, id: DbId) -> Result<bool, CoreError>;
}

/// Lookup tables: providers, brands, designers.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn list_providers(&self) -> Result<Vec<Provider>, CoreError>;
    async fn create_provider(&self, input: &NewProvider) -> Result<Provider, CoreError>;
    async fn delete_provider(&self, id: DbId) -> Result<bool, CoreError>;

    async fn list_brands(&self) -> Result<Vec<Brand>, CoreError>;
    async fn create_brand(&self, input: &NewBrand) -> Result<Brand, CoreError>;
    async fn update_brand(&self, id: DbId, input: &BrandPatch) -> Result<Option<Brand>, CoreError>;
    async fn delete_brand(&self, id: DbId) -> Result<bool, CoreError>;

    async fn list_designers(&self) -> Result<Vec<Designer>, CoreError>;
    async fn create_designer(&self, input: &NewDesigner) -> Result<Designer, CoreError>;
    async fn update_designer_profile(
        &self,
        id: DbId,
        input: &DesignerPatch,
    ) -> Result<Option<Designer>, CoreError>;
    async fn delete_designer(&self, id: DbId) -> Result<bool, CoreError>;
}

/// Both halves of the backing store behind one object.
pub trait DataSource: AssetGateway + CatalogGateway {}

impl<T: AssetGateway + CatalogGateway> DataSource for T {}

// ---------------------------------------------------------------------------
// Unconfigured store
// ---------------------------------------------------------------------------

/// Stand-in used when no backing store is configured.
///
/// Every call fails with [`CoreError::NotConfigured`], so the service runs in
/// a blocking "not configured" state instead of partially working.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

fn not_configured<T>() -> Result<T, CoreError> {
    Err(CoreError::NotConfigured(
        "DATABASE_URL is not set; the asset store is unavailable".to_string(),
    ))
}

#[async_trait]
impl AssetGateway for Unconfigured {
    async fn list_assets(&self, _filter: &AssetFilter) -> Result<Vec<Asset>, CoreError> {
        not_configured()
    }
    async fn find_asset(&self, _id: DbId) -> Result<Option<Asset>, CoreError> {
        not_configured()
    }
    async fn create_asset(&self, _input: &NewAsset) -> Result<Asset, CoreError> {
        not_configured()
    }
    async fn update_status(&self, _id: DbId, _status: AssetStatus) -> Result<(), CoreError> {
        not_configured()
    }
    async fn update_designer(
        &self,
        _id: DbId,
        _designer_id: Option<DbId>,
    ) -> Result<(), CoreError> {
        not_configured()
    }
    async fn attach_brands(&self, _id: DbId, _brand_ids: &[DbId]) -> Result<(), CoreError> {
        not_configured()
    }
    async fn set_reflected(
        &self,
        _asset_id: DbId,
        _brand_id: DbId,
        _reflected: bool,
        _reflected_by: Option<&str>,
    ) -> Result<(), CoreError> {
        not_configured()
    }
    async fn delete_asset(&self, _id: DbId) -> Result<bool, CoreError> {
        not_configured()
    }
}

#[async_trait]
impl CatalogGateway for Unconfigured {
    async fn list_providers(&self) -> Result<Vec<Provider>, CoreError> {
        not_configured()
    }
    async fn create_provider(&self, _input: &NewProvider) -> Result<Provider, CoreError> {
        not_configured()
    }
    async fn delete_provider(&self, _id: DbId) -> Result<bool, CoreError> {
        not_configured()
    }
    async fn list_brands(&self) -> Result<Vec<Brand>, CoreError> {
        not_configured()
    }
    async fn create_brand(&self, _input: &NewBrand) -> Result<Brand, CoreError> {
        not_configured()
    }
    async fn update_brand(
        &self,
        _id: DbId,
        _input: &BrandPatch,
    ) -> Result<Option<Brand>, CoreError> {
        not_configured()
    }
    async fn delete_brand(&self, _id: DbId) -> Result<bool, CoreError> {
        not_configured()
    }
    async fn list_designers(&self) -> Result<Vec<Designer>, CoreError> {
        not_configured()
    }
    async fn create_designer(&self, _input: &NewDesigner) -> Result<Designer, CoreError> {
        not_configured()
    }
    async fn update_designer_profile(
        &self,
        _id: DbId,
        _input: &DesignerPatch,
    ) -> Result<Option<Designer>, CoreError> {
        not_configured()
    }
    async fn delete_designer(&self, _id: DbId) -> Result<bool, CoreError> {
        not_configured()
    }
}

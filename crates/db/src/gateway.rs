//! PostgreSQL implementation of the core gateway traits.

use std::collections::HashMap;

use assetboard_core::error::CoreError;
use assetboard_core::gateway::{AssetGateway, CatalogGateway};
use assetboard_core::models::{
    Asset, AssetFilter, AssetStatus, Brand, BrandPatch, Designer, DesignerPatch, NewAsset,
    NewBrand, NewDesigner, NewProvider, Provider,
};
use assetboard_core::types::DbId;
use async_trait::async_trait;

use crate::models::asset::{AssetBrandRow, AssetRow};
use crate::repositories::{AssetBrandRepo, AssetRepo, BrandRepo, DesignerRepo, ProviderRepo};
use crate::{fetch_all_pages, DbPool, PAGE_SIZE};

/// Gateway backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgGateway {
    pool: DbPool,
}

impl PgGateway {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Load brand rows for `rows` and assemble domain assets.
    async fn hydrate(&self, rows: Vec<AssetRow>) -> Result<Vec<Asset>, CoreError> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut by_asset: HashMap<DbId, Vec<AssetBrandRow>> = HashMap::new();
        for link in AssetBrandRepo::list_for_assets(&self.pool, &ids)
            .await
            .map_err(db_error)?
        {
            by_asset.entry(link.asset_id).or_default().push(link);
        }
        rows.into_iter()
            .map(|row| {
                let brands = by_asset.remove(&row.id).unwrap_or_default();
                row.into_asset(brands)
            })
            .collect()
    }

    async fn require_asset(&self, id: DbId) -> Result<Asset, CoreError> {
        self.find_asset(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Asset", id })
    }
}

/// Map a sqlx error onto the domain error.
///
/// Unique violations (23505) become conflicts, foreign-key violations (23503)
/// and check violations (23514) become validation errors, and everything else
/// is reported as an upstream failure.
fn db_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some("23505") => {
                return CoreError::Conflict(match db_err.constraint() {
                    Some(constraint) => format!("Duplicate value violates '{constraint}'"),
                    None => "Duplicate value".to_string(),
                });
            }
            Some("23503") => {
                return CoreError::Validation("Referenced record does not exist".to_string());
            }
            Some("23514") => {
                return CoreError::Validation(db_err.message().to_string());
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Upstream(err.to_string())
}

fn found(updated: bool, entity: &'static str, id: DbId) -> Result<(), CoreError> {
    if updated {
        Ok(())
    } else {
        Err(CoreError::NotFound { entity, id })
    }
}

#[async_trait]
impl AssetGateway for PgGateway {
    async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>, CoreError> {
        let pool = &self.pool;
        let rows = fetch_all_pages(PAGE_SIZE, move |limit, offset| {
            AssetRepo::list_page(pool, filter, limit, offset)
        })
        .await
        .map_err(db_error)?;
        tracing::debug!(count = rows.len(), "Loaded asset rows");
        self.hydrate(rows).await
    }

    async fn find_asset(&self, id: DbId) -> Result<Option<Asset>, CoreError> {
        let Some(row) = AssetRepo::find_by_id(&self.pool, id)
            .await
            .map_err(db_error)?
        else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![row]).await?.pop())
    }

    async fn create_asset(&self, input: &NewAsset) -> Result<Asset, CoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let row = AssetRepo::create(&mut *tx, input).await.map_err(db_error)?;
        AssetBrandRepo::attach(&mut *tx, row.id, &input.brand_ids)
            .await
            .map_err(db_error)?;
        tx.commit().await.map_err(db_error)?;
        self.require_asset(row.id).await
    }

    async fn update_status(&self, id: DbId, status: AssetStatus) -> Result<(), CoreError> {
        let updated = AssetRepo::update_status(&self.pool, id, status)
            .await
            .map_err(db_error)?;
        found(updated, "Asset", id)
    }

    async fn update_designer(
        &self,
        id: DbId,
        designer_id: Option<DbId>,
    ) -> Result<(), CoreError> {
        let updated = AssetRepo::update_designer(&self.pool, id, designer_id)
            .await
            .map_err(db_error)?;
        found(updated, "Asset", id)
    }

    async fn attach_brands(&self, id: DbId, brand_ids: &[DbId]) -> Result<(), CoreError> {
        AssetBrandRepo::attach(&self.pool, id, brand_ids)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn set_reflected(
        &self,
        asset_id: DbId,
        brand_id: DbId,
        reflected: bool,
        reflected_by: Option<&str>,
    ) -> Result<(), CoreError> {
        let updated =
            AssetBrandRepo::set_reflected(&self.pool, asset_id, brand_id, reflected, reflected_by)
                .await
                .map_err(db_error)?;
        found(updated, "AssetBrand", brand_id)
    }

    async fn delete_asset(&self, id: DbId) -> Result<bool, CoreError> {
        AssetRepo::delete(&self.pool, id).await.map_err(db_error)
    }
}

#[async_trait]
impl CatalogGateway for PgGateway {
    async fn list_providers(&self) -> Result<Vec<Provider>, CoreError> {
        let rows = ProviderRepo::list(&self.pool).await.map_err(db_error)?;
        Ok(rows.into_iter().map(Provider::from).collect())
    }

    async fn create_provider(&self, input: &NewProvider) -> Result<Provider, CoreError> {
        let row = ProviderRepo::create(&self.pool, input)
            .await
            .map_err(|err| match db_error(err) {
                CoreError::Conflict(_) => CoreError::Conflict(format!(
                    "Provider '{}' already exists",
                    input.name.trim()
                )),
                other => other,
            })?;
        Ok(row.into())
    }

    async fn delete_provider(&self, id: DbId) -> Result<bool, CoreError> {
        ProviderRepo::delete(&self.pool, id).await.map_err(db_error)
    }

    async fn list_brands(&self) -> Result<Vec<Brand>, CoreError> {
        let rows = BrandRepo::list(&self.pool).await.map_err(db_error)?;
        Ok(rows.into_iter().map(Brand::from).collect())
    }

    async fn create_brand(&self, input: &NewBrand) -> Result<Brand, CoreError> {
        let row = BrandRepo::create(&self.pool, input).await.map_err(db_error)?;
        Ok(row.into())
    }

    async fn update_brand(&self, id: DbId, input: &BrandPatch) -> Result<Option<Brand>, CoreError> {
        let row = BrandRepo::update(&self.pool, id, input)
            .await
            .map_err(db_error)?;
        Ok(row.map(Brand::from))
    }

    async fn delete_brand(&self, id: DbId) -> Result<bool, CoreError> {
        BrandRepo::delete(&self.pool, id).await.map_err(db_error)
    }

    async fn list_designers(&self) -> Result<Vec<Designer>, CoreError> {
        let rows = DesignerRepo::list(&self.pool).await.map_err(db_error)?;
        Ok(rows.into_iter().map(Designer::from).collect())
    }

    async fn create_designer(&self, input: &NewDesigner) -> Result<Designer, CoreError> {
        let row = DesignerRepo::create(&self.pool, input)
            .await
            .map_err(db_error)?;
        Ok(row.into())
    }

    async fn update_designer_profile(
        &self,
        id: DbId,
        input: &DesignerPatch,
    ) -> Result<Option<Designer>, CoreError> {
        let row = DesignerRepo::update(&self.pool, id, input)
            .await
            .map_err(db_error)?;
        Ok(row.map(Designer::from))
    }

    async fn delete_designer(&self, id: DbId) -> Result<bool, CoreError> {
        DesignerRepo::delete(&self.pool, id).await.map_err(db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn non_database_errors_are_upstream() {
        assert_matches!(db_error(sqlx::Error::RowNotFound), CoreError::Upstream(_));
        assert_matches!(db_error(sqlx::Error::PoolTimedOut), CoreError::Upstream(_));
    }

    #[test]
    fn missing_rows_become_not_found() {
        assert_matches!(
            found(false, "Asset", 4),
            Err(CoreError::NotFound { entity: "Asset", id: 4 })
        );
        assert!(found(true, "Asset", 4).is_ok());
    }
}

use assetboard_core::error::CoreError;
use assetboard_core::models::{Asset, AssetBrand, AssetStatus};
use assetboard_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use sqlx::FromRow;

/// A row from the `assets` table. Brands are loaded separately.
#[derive(Debug, Clone, FromRow)]
pub struct AssetRow {
    pub id: DbId,
    pub game_name: String,
    pub provider: String,
    pub status: String,
    pub designer_id: Option<DbId>,
    pub found_by: Option<String>,
    pub date_found: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AssetRow {
    /// Combine the row with its brand rows into a domain asset.
    pub fn into_asset(self, brands: Vec<AssetBrandRow>) -> Result<Asset, CoreError> {
        let status = AssetStatus::from_str_value(&self.status).map_err(|_| {
            CoreError::Internal(format!(
                "Asset {} has unknown status '{}'",
                self.id, self.status
            ))
        })?;
        Ok(Asset {
            id: self.id,
            game_name: self.game_name,
            provider: self.provider,
            brands: brands.into_iter().map(AssetBrand::from).collect(),
            status,
            designer_id: self.designer_id,
            found_by: self.found_by,
            date_found: self.date_found,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// An `asset_brands` association joined with the brand's name and color.
#[derive(Debug, Clone, FromRow)]
pub struct AssetBrandRow {
    pub asset_id: DbId,
    pub brand_id: DbId,
    pub name: String,
    pub color: Option<String>,
    pub reflected: bool,
    pub reflected_by: Option<String>,
    pub reflected_at: Option<Timestamp>,
}

impl From<AssetBrandRow> for AssetBrand {
    fn from(row: AssetBrandRow) -> Self {
        AssetBrand {
            brand_id: row.brand_id,
            name: row.name,
            color: row.color,
            reflected: row.reflected,
            reflected_by: row.reflected_by,
            reflected_at: row.reflected_at,
        }
    }
}

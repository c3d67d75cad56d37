use assetboard_core::models::Brand;
use assetboard_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `brands` table.
#[derive(Debug, Clone, FromRow)]
pub struct BrandRow {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<BrandRow> for Brand {
    fn from(row: BrandRow) -> Self {
        Brand {
            id: row.id,
            name: row.name,
            color: row.color,
        }
    }
}

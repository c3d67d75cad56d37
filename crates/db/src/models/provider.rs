use assetboard_core::models::Provider;
use assetboard_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `providers` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProviderRow {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProviderRow> for Provider {
    fn from(row: ProviderRow) -> Self {
        Provider {
            id: row.id,
            name: row.name,
        }
    }
}

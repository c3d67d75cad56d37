use assetboard_core::models::Designer;
use assetboard_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `designers` table.
#[derive(Debug, Clone, FromRow)]
pub struct DesignerRow {
    pub id: DbId,
    pub name: String,
    pub avatar: Option<String>,
    pub email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<DesignerRow> for Designer {
    fn from(row: DesignerRow) -> Self {
        Designer {
            id: row.id,
            name: row.name,
            avatar: row.avatar,
            email: row.email,
        }
    }
}

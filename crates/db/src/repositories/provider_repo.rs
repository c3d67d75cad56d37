//! Repository for the `providers` table.

use assetboard_core::models::NewProvider;
use assetboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::provider::ProviderRow;

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for game providers.
pub struct ProviderRepo;

impl ProviderRepo {
    /// Insert a new provider. Names are unique ignoring case.
    pub async fn create(pool: &PgPool, input: &NewProvider) -> Result<ProviderRow, sqlx::Error> {
        let query = format!("INSERT INTO providers (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, ProviderRow>(&query)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    /// List all providers ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProviderRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM providers ORDER BY LOWER(name), id");
        sqlx::query_as::<_, ProviderRow>(&query).fetch_all(pool).await
    }

    /// Delete a provider. Assets keep their provider text.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM providers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

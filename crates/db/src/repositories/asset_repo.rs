//! Repository for the `assets` table.

use assetboard_core::models::{AssetFilter, AssetStatus, NewAsset};
use assetboard_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::asset::AssetRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, game_name, provider, status, designer_id, found_by, date_found, \
                       notes, created_at, updated_at";

/// Provides CRUD operations for assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Insert a new asset, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &NewAsset) -> Result<AssetRow, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO assets (game_name, provider, status, designer_id, found_by, date_found, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssetRow>(&query)
            .bind(input.game_name.trim())
            .bind(input.provider.trim())
            .bind(input.status.as_str())
            .bind(input.designer_id)
            .bind(&input.found_by)
            .bind(input.date_found)
            .bind(&input.notes)
            .fetch_one(executor)
            .await
    }

    /// Find an asset by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AssetRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, AssetRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of assets matching `filter`, ordered by id.
    ///
    /// Provider comparison ignores case and surrounding whitespace.
    pub async fn list_page(
        pool: &PgPool,
        filter: &AssetFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AssetRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets
             WHERE ($1::TEXT IS NULL OR LOWER(TRIM(provider)) = LOWER(TRIM($1)))
               AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, AssetRow>(&query)
            .bind(filter.provider.as_deref())
            .bind(filter.status.map(|s| s.as_str()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Set the status of an asset. Returns `true` if a row was updated.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: AssetStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE assets SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set or clear the designer of an asset. Returns `true` if a row was updated.
    pub async fn update_designer(
        pool: &PgPool,
        id: DbId,
        designer_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE assets SET designer_id = $2 WHERE id = $1")
            .bind(id)
            .bind(designer_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete an asset by ID. Brand associations cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

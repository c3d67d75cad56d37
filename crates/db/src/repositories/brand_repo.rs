//! Repository for the `brands` table.

use assetboard_core::models::{BrandPatch, NewBrand};
use assetboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::brand::BrandRow;

const COLUMNS: &str = "id, name, color, created_at, updated_at";

/// Provides CRUD operations for casino brands.
pub struct BrandRepo;

impl BrandRepo {
    pub async fn create(pool: &PgPool, input: &NewBrand) -> Result<BrandRow, sqlx::Error> {
        let query = format!("INSERT INTO brands (name, color) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, BrandRow>(&query)
            .bind(input.name.trim())
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<BrandRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands ORDER BY LOWER(name), id");
        sqlx::query_as::<_, BrandRow>(&query).fetch_all(pool).await
    }

    /// Update a brand. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &BrandPatch,
    ) -> Result<Option<BrandRow>, sqlx::Error> {
        let query = format!(
            "UPDATE brands SET
                name = COALESCE($2, name),
                color = COALESCE($3, color)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BrandRow>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a brand. Its asset associations cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

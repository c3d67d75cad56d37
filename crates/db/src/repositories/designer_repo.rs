//! Repository for the `designers` table.

use assetboard_core::models::{DesignerPatch, NewDesigner};
use assetboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::designer::DesignerRow;

const COLUMNS: &str = "id, name, avatar, email, created_at, updated_at";

pub struct DesignerRepo;

impl DesignerRepo {
    pub async fn create(pool: &PgPool, input: &NewDesigner) -> Result<DesignerRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO designers (name, avatar, email) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DesignerRow>(&query)
            .bind(input.name.trim())
            .bind(&input.avatar)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<DesignerRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM designers ORDER BY LOWER(name), id");
        sqlx::query_as::<_, DesignerRow>(&query).fetch_all(pool).await
    }

    /// Update a designer profile. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &DesignerPatch,
    ) -> Result<Option<DesignerRow>, sqlx::Error> {
        let query = format!(
            "UPDATE designers SET
                name = COALESCE($2, name),
                avatar = COALESCE($3, avatar),
                email = COALESCE($4, email)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DesignerRow>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.avatar)
            .bind(&input.email)
            .fetch_optional(pool)
            .await
    }

    /// Delete a designer. Assigned assets fall back to unassigned.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM designers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `asset_brands` association table.

use assetboard_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::asset::AssetBrandRow;

/// Association columns joined with the brand's display fields.
const COLUMNS: &str = "ab.asset_id, ab.brand_id, b.name, b.color, ab.reflected, \
                       ab.reflected_by, ab.reflected_at";

pub struct AssetBrandRepo;

impl AssetBrandRepo {
    /// Brand associations of the given assets, ordered by asset then brand name.
    pub async fn list_for_assets(
        pool: &PgPool,
        asset_ids: &[DbId],
    ) -> Result<Vec<AssetBrandRow>, sqlx::Error> {
        if asset_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM asset_brands ab
             JOIN brands b ON b.id = ab.brand_id
             WHERE ab.asset_id = ANY($1)
             ORDER BY ab.asset_id, b.name"
        );
        sqlx::query_as::<_, AssetBrandRow>(&query)
            .bind(asset_ids)
            .fetch_all(pool)
            .await
    }

    /// Attach brands to an asset, unreflected. Existing associations are kept.
    pub async fn attach<'e, E>(
        executor: E,
        asset_id: DbId,
        brand_ids: &[DbId],
    ) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if brand_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO asset_brands (asset_id, brand_id)
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT (asset_id, brand_id) DO NOTHING",
        )
        .bind(asset_id)
        .bind(brand_ids)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Set the reflected flag. Setting it stamps who and when; clearing it
    /// removes both. Returns `true` if the association exists.
    pub async fn set_reflected(
        pool: &PgPool,
        asset_id: DbId,
        brand_id: DbId,
        reflected: bool,
        reflected_by: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE asset_brands SET
                reflected = $3,
                reflected_by = CASE WHEN $3 THEN $4 ELSE NULL END,
                reflected_at = CASE WHEN $3 THEN NOW() ELSE NULL END
             WHERE asset_id = $1 AND brand_id = $2",
        )
        .bind(asset_id)
        .bind(brand_id)
        .bind(reflected)
        .bind(reflected_by)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

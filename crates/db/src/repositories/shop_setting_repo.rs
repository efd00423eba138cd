//! Repository for the `shop_settings` table.

use sqlx::PgPool;

use crate::models::shop_setting::ShopSetting;

/// Column list for `shop_settings` queries.
const COLUMNS: &str = "id, shop, value, created_at, updated_at";

/// Provides data access for per-shop settings records.
pub struct ShopSettingRepo;

impl ShopSettingRepo {
    /// Get the settings record for a shop.
    ///
    /// Returns `None` if the shop has never saved settings.
    pub async fn find_by_shop(
        pool: &PgPool,
        shop: &str,
    ) -> Result<Option<ShopSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shop_settings WHERE shop = $1");
        sqlx::query_as::<_, ShopSetting>(&query)
            .bind(shop)
            .fetch_optional(pool)
            .await
    }

    /// Insert the shop's record, or replace its value wholesale if one
    /// already exists.
    pub async fn upsert(
        pool: &PgPool,
        shop: &str,
        value: &str,
    ) -> Result<ShopSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO shop_settings (shop, value) \
             VALUES ($1, $2) \
             ON CONFLICT (shop) DO UPDATE SET \
                 value = EXCLUDED.value, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShopSetting>(&query)
            .bind(shop)
            .bind(value)
            .fetch_one(pool)
            .await
    }
}

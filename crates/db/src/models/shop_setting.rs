use serde::Serialize;
use sqlx::FromRow;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A row from the `shop_settings` table.
///
/// `value` is the raw JSON string; decoding belongs to
/// `countdown_core::settings::ShopSettings`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShopSetting {
    pub id: i64,
    pub shop: String,
    pub value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

//! The settings store seam.
//!
//! Handlers depend on `Arc<dyn SettingsStore>`; production wires in
//! [`PgSettingsStore`], tests and database-less runs use
//! [`MemorySettingsStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::repositories::ShopSettingRepo;
use crate::DbPool;

/// Any failure below the store boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// No connection could be had: the pool timed out or was closed.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

/// Key-value persistence of raw settings JSON, keyed by shop identifier.
///
/// Shop keys are case-sensitive. `upsert` replaces the stored value
/// entirely; concurrent writers for the same shop are last-write-wins.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, shop: &str) -> Result<Option<String>, StoreError>;

    async fn upsert(&self, shop: &str, value: &str) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

pub struct PgSettingsStore {
    pool: DbPool,
}

impl PgSettingsStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn get(&self, shop: &str) -> Result<Option<String>, StoreError> {
        let record = ShopSettingRepo::find_by_shop(&self.pool, shop).await?;
        Ok(record.map(|r| r.value))
    }

    async fn upsert(&self, shop: &str, value: &str) -> Result<(), StoreError> {
        let record = ShopSettingRepo::upsert(&self.pool, shop, value).await?;
        tracing::debug!(shop, id = record.id, "Shop settings upserted");
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemorySettingsStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, shop: &str) -> Result<Option<String>, StoreError> {
        Ok(self.records.read().await.get(shop).cloned())
    }

    async fn upsert(&self, shop: &str, value: &str) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(shop.to_string(), value.to_string());
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

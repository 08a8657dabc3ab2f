//! MySQL database module

mod devices;
mod schema;
mod status;

use async_trait::async_trait;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySql, MySqlPool, Transaction};

use super::{DeviceStore, StoreSession};
use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::models::{DeviceRecord, StatusRecord, StatusTarget};

/// MySQL database wrapper
#[derive(Clone)]
pub struct MySqlDb {
    pool: MySqlPool,
}

impl MySqlDb {
    /// Connect to MySQL database
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let url = config
            .mysql_url
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("MySQL URL not configured"))?;

        tracing::info!("Connecting to MySQL...");

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .connect(url)
            .await?;

        tracing::info!("MySQL connected successfully");

        Ok(Self { pool })
    }

    /// Get the connection pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl DeviceStore for MySqlDb {
    async fn begin(&self) -> Result<Box<dyn StoreSession>, AppError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(MySqlSession { tx }))
    }
}

/// One transaction; dropping it uncommitted rolls back and frees the connection
pub struct MySqlSession {
    tx: Transaction<'static, MySql>,
}

#[async_trait]
impl StoreSession for MySqlSession {
    async fn find_device_ids(&mut self) -> Result<Vec<String>, AppError> {
        self.select_device_ids().await
    }

    async fn find_device(&mut self, device_id: &str) -> Result<Option<DeviceRecord>, AppError> {
        self.select_device(device_id).await
    }

    async fn find_status_targets(&mut self) -> Result<Vec<StatusTarget>, AppError> {
        self.select_status_targets().await
    }

    async fn upsert_device(&mut self, device: &DeviceRecord) -> Result<(), AppError> {
        self.upsert_device_row(device).await
    }

    async fn insert_status(&mut self, record: &StatusRecord) -> Result<(), AppError> {
        self.insert_status_row(record).await
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), AppError> {
        self.tx.rollback().await?;
        Ok(())
    }
}

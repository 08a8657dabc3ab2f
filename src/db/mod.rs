//! Persistence for the device registry and status tables
//!
//! Reconcile jobs talk to a [`DeviceStore`] handle. Each job invocation opens
//! one [`StoreSession`] (a transaction) and either commits or rolls it back.
//! A session dropped without `commit` discards its writes.

#[cfg(test)]
pub mod memory;
pub mod mysql;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{DeviceRecord, StatusRecord, StatusTarget};

pub use self::mysql::MySqlDb;

#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Open a session scoped to one job invocation
    async fn begin(&self) -> Result<Box<dyn StoreSession>, AppError>;
}

#[async_trait]
pub trait StoreSession: Send {
    /// All registered device ids
    async fn find_device_ids(&mut self) -> Result<Vec<String>, AppError>;

    async fn find_device(&mut self, device_id: &str) -> Result<Option<DeviceRecord>, AppError>;

    /// Every registered device with its registered type
    async fn find_status_targets(&mut self) -> Result<Vec<StatusTarget>, AppError>;

    /// Insert a new device, or overwrite name / hub / cloud flag of an
    /// existing one. `device_type` and `enable_get_status` of an existing
    /// row are left alone.
    async fn upsert_device(&mut self, device: &DeviceRecord) -> Result<(), AppError>;

    /// Append one status row to the table matching its variant
    async fn insert_status(&mut self, record: &StatusRecord) -> Result<(), AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;

    async fn rollback(self: Box<Self>) -> Result<(), AppError>;
}

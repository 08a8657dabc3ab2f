//! Reconcile loop: keeps the local registry in sync with the SwitchBot
//! device list and appends status rows.
//!
//! - `registration`: device list → `switchbot_device_table` upserts
//! - `polling`: per-device status → one row per device per cycle
//! - `jobs`: scheduler wrappers that log instead of propagating errors

mod jobs;
mod polling;
mod registration;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use crate::db::{DeviceStore, StoreSession};
use crate::error::AppError;
use crate::switchbot::SwitchBotApi;

pub use jobs::{DeviceRegistrationJob, StatusPollJob};

pub struct Collector {
    api: Arc<dyn SwitchBotApi>,
    store: Arc<dyn DeviceStore>,
}

impl Collector {
    pub fn new(api: Arc<dyn SwitchBotApi>, store: Arc<dyn DeviceStore>) -> Self {
        Self { api, store }
    }

    /// Commit on success, roll back on error. The session is consumed either way.
    async fn finish<T>(
        session: Box<dyn StoreSession>,
        result: Result<T, AppError>,
        job: &str,
    ) -> Result<T, AppError> {
        match result {
            Ok(value) => {
                session.commit().await?;
                tracing::info!("[{}] Session committed", job);
                Ok(value)
            }
            Err(e) => {
                if let Err(rb) = session.rollback().await {
                    tracing::error!("[{}] Rollback failed: {}", job, rb);
                } else {
                    tracing::warn!("[{}] Session rolled back", job);
                }
                Err(e)
            }
        }
    }
}

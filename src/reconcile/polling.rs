//! Status polling: one status row per registered device per cycle

use chrono::{DateTime, Utc};

use super::Collector;
use crate::db::StoreSession;
use crate::error::AppError;
use crate::models::{StatusRecord, StatusTarget};
use crate::switchbot::DeviceStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollReport {
    pub written: usize,
    /// Fetch or decode failed; logged and skipped
    pub failed: usize,
    /// Device type has no status table
    pub skipped: usize,
}

impl Collector {
    /// One polling cycle stamped with the current time
    pub async fn poll_device_status(&self) -> Result<PollReport, AppError> {
        self.poll_device_status_at(Utc::now()).await
    }

    /// One polling cycle; every row written shares `timestamp`
    pub async fn poll_device_status_at(
        &self,
        timestamp: DateTime<Utc>,
    ) -> Result<PollReport, AppError> {
        let mut session = self.store.begin().await?;
        let result = self.poll_in(session.as_mut(), timestamp).await;
        Self::finish(session, result, "Status").await
    }

    async fn poll_in(
        &self,
        session: &mut dyn StoreSession,
        timestamp: DateTime<Utc>,
    ) -> Result<PollReport, AppError> {
        let targets = session.find_status_targets().await?;
        let mut report = PollReport::default();

        for target in &targets {
            let status = match self.fetch_status(target).await {
                Ok(status) => status,
                Err(e) => {
                    tracing::error!("[Status] Device {} failed: {}", target.device_id, e);
                    report.failed += 1;
                    continue;
                }
            };

            if let DeviceStatus::Unknown(ref device_type) = status {
                tracing::warn!(
                    "[Status] Device {} has unsupported type {:?}, skipped",
                    target.device_id,
                    device_type
                );
                report.skipped += 1;
                continue;
            }

            if let Some(record) = status.into_record(&target.device_id, timestamp) {
                session.insert_status(&record).await?;
                log_record(&record);
                report.written += 1;
            }
        }

        tracing::info!(
            "[Status] {} targets: {} written, {} failed, {} skipped",
            targets.len(),
            report.written,
            report.failed,
            report.skipped
        );

        Ok(report)
    }

    async fn fetch_status(&self, target: &StatusTarget) -> Result<DeviceStatus, AppError> {
        let body = self.api.get_device_status(&target.device_id).await?;
        DeviceStatus::from_body(body, &target.device_type)
    }
}

fn log_record(record: &StatusRecord) {
    tracing::debug!(
        "[Status] Staged {} row for {}: {:?}",
        record.kind().table_name(),
        record.device_id(),
        record
    );
}

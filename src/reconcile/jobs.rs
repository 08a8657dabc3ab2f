//! Scheduler entry points for the two reconcile cycles

use std::sync::Arc;

use async_trait::async_trait;

use super::Collector;
use crate::scheduler::ScheduledJob;

pub struct DeviceRegistrationJob {
    collector: Arc<Collector>,
}

impl DeviceRegistrationJob {
    pub fn new(collector: Arc<Collector>) -> Self {
        Self { collector }
    }
}

#[async_trait]
impl ScheduledJob for DeviceRegistrationJob {
    fn name(&self) -> &'static str {
        "device_registration"
    }

    async fn run(&self) {
        match self.collector.register_devices().await {
            Ok(report) => tracing::info!(
                "[Register] Done: {} inserted, {} updated, {} unchanged",
                report.inserted,
                report.updated,
                report.unchanged
            ),
            Err(e) if e.is_api_error() => tracing::error!("[Register] API call failed: {}", e),
            Err(e) => tracing::error!("[Register] Cycle failed: {}", e),
        }
    }
}

pub struct StatusPollJob {
    collector: Arc<Collector>,
}

impl StatusPollJob {
    pub fn new(collector: Arc<Collector>) -> Self {
        Self { collector }
    }
}

#[async_trait]
impl ScheduledJob for StatusPollJob {
    fn name(&self) -> &'static str {
        "device_status"
    }

    async fn run(&self) {
        if let Err(e) = self.collector.poll_device_status().await {
            tracing::error!("[Status] Cycle failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::reconcile::testing::{remote, FakeApi};
    use serde_json::json;

    #[tokio::test]
    async fn test_jobs_register_then_poll() {
        let api = Arc::new(
            FakeApi::new()
                .with_devices(vec![remote("D1", "Meter", "Meter", None)])
                .with_status(
                    "D1",
                    json!({ "deviceId": "D1", "deviceType": "Meter", "humidity": 48 }),
                ),
        );
        let store = MemoryStore::new();
        let collector = Arc::new(Collector::new(api, Arc::new(store.clone())));

        DeviceRegistrationJob::new(collector.clone()).run().await;
        StatusPollJob::new(collector).run().await;

        let state = store.snapshot();
        assert_eq!(state.devices.len(), 1);
        assert_eq!(state.statuses.len(), 1);
        assert_eq!(store.commits(), 2);
    }

    #[tokio::test]
    async fn test_failed_job_swallows_error_and_releases_session() {
        let api = Arc::new(FakeApi::new().with_list_error(503, "maintenance"));
        let store = MemoryStore::new();
        let collector = Arc::new(Collector::new(api, Arc::new(store.clone())));

        DeviceRegistrationJob::new(collector).run().await;

        assert_eq!(store.open_sessions(), 0);
        assert_eq!(store.rollbacks(), 1);
    }
}

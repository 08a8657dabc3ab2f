//! Device registration: remote device list → local registry

use std::collections::HashSet;

use super::Collector;
use crate::db::StoreSession;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl Collector {
    /// One registration cycle in its own session
    pub async fn register_devices(&self) -> Result<RegistrationReport, AppError> {
        let mut session = self.store.begin().await?;
        let result = self.register_in(session.as_mut()).await;
        Self::finish(session, result, "Register").await
    }

    async fn register_in(
        &self,
        session: &mut dyn StoreSession,
    ) -> Result<RegistrationReport, AppError> {
        let mut known: HashSet<String> = session.find_device_ids().await?.into_iter().collect();

        let remote = self.api.list_devices().await?;
        tracing::debug!(
            "[Register] {} remote devices, {} registered",
            remote.device_list.len(),
            known.len()
        );

        let mut report = RegistrationReport::default();

        for device in &remote.device_list {
            if !known.contains(&device.device_id) {
                session.upsert_device(&device.to_record(true)).await?;
                known.insert(device.device_id.clone());
                report.inserted += 1;
                tracing::info!(
                    "[Register] New device {} (device id: {})",
                    device.device_name,
                    device.device_id
                );
                continue;
            }

            let Some(local) = session.find_device(&device.device_id).await? else {
                // Listed by find_device_ids but gone now; nothing to compare against
                continue;
            };

            let remote_record = device.to_record(local.enable_get_status);
            if local.differs_from(&remote_record) {
                session.upsert_device(&remote_record).await?;
                report.updated += 1;
                tracing::info!(
                    "[Register] Updated device {} (device id: {})",
                    device.device_name,
                    device.device_id
                );
            } else {
                report.unchanged += 1;
            }
        }

        Ok(report)
    }
}

//! switchbot_device_table queries

use crate::error::AppError;
use crate::models::{DeviceRecord, StatusTarget};

use super::MySqlSession;

impl MySqlSession {
    pub(super) async fn select_device_ids(&mut self) -> Result<Vec<String>, AppError> {
        let ids = sqlx::query_scalar::<_, String>(
            "SELECT device_id FROM switchbot_device_table ORDER BY data_id ASC",
        )
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(ids)
    }

    pub(super) async fn select_device(
        &mut self,
        device_id: &str,
    ) -> Result<Option<DeviceRecord>, AppError> {
        let device = sqlx::query_as::<_, DeviceRecord>(
            r#"
            SELECT device_id, device_name, device_type, hub_device_id,
                   enable_cloud_service, enable_get_status
            FROM switchbot_device_table
            WHERE device_id = ?
            "#,
        )
        .bind(device_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(device)
    }

    pub(super) async fn select_status_targets(&mut self) -> Result<Vec<StatusTarget>, AppError> {
        let targets = sqlx::query_as::<_, StatusTarget>(
            r#"
            SELECT device_id, device_type
            FROM switchbot_device_table
            ORDER BY data_id ASC
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(targets)
    }

    pub(super) async fn upsert_device_row(&mut self, device: &DeviceRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO switchbot_device_table
            (device_id, device_name, device_type, hub_device_id, enable_cloud_service, enable_get_status)
            VALUES (?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                device_name = VALUES(device_name),
                hub_device_id = VALUES(hub_device_id),
                enable_cloud_service = VALUES(enable_cloud_service)
            "#,
        )
        .bind(&device.device_id)
        .bind(&device.device_name)
        .bind(&device.device_type)
        .bind(&device.hub_device_id)
        .bind(device.enable_cloud_service)
        .bind(device.enable_get_status)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }
}

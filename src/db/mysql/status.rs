//! Append-only status table inserts

use crate::error::AppError;
use crate::models::StatusRecord;

use super::MySqlSession;

impl MySqlSession {
    pub(super) async fn insert_status_row(&mut self, record: &StatusRecord) -> Result<(), AppError> {
        match record {
            StatusRecord::Meter(row) => {
                sqlx::query(
                    r#"
                    INSERT INTO switchbot_meter_status
                    (is_api_success, timestamp, device_id, humidity, temperature, version, battery)
                    VALUES (?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(row.is_api_success)
                .bind(row.timestamp)
                .bind(&row.device_id)
                .bind(row.humidity)
                .bind(row.temperature)
                .bind(&row.version)
                .bind(row.battery)
                .execute(&mut *self.tx)
                .await?;
            }
            StatusRecord::PlugMini(row) => {
                sqlx::query(
                    r#"
                    INSERT INTO switchbot_plug_mini_status
                    (is_api_success, timestamp, device_id, voltage, version, weight,
                     electricity_of_day, electric_current, power)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(row.is_api_success)
                .bind(row.timestamp)
                .bind(&row.device_id)
                .bind(row.voltage)
                .bind(&row.version)
                .bind(row.weight)
                .bind(row.electricity_of_day)
                .bind(row.electric_current)
                .bind(row.power)
                .execute(&mut *self.tx)
                .await?;
            }
            StatusRecord::Hub(row) => {
                sqlx::query(
                    r#"
                    INSERT INTO switchbot_hub_status
                    (is_api_success, timestamp, device_id, humidity, temperature, light_level, version)
                    VALUES (?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(row.is_api_success)
                .bind(row.timestamp)
                .bind(&row.device_id)
                .bind(row.humidity)
                .bind(row.temperature)
                .bind(row.light_level)
                .bind(&row.version)
                .execute(&mut *self.tx)
                .await?;
            }
        }

        Ok(())
    }
}

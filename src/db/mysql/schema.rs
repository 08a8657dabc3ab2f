//! Table creation for the registry and status tables (auto-migration on startup)

use super::MySqlDb;
use crate::error::AppError;

const DEVICE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS switchbot_device_table (
        data_id INT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
        device_id VARCHAR(255) NOT NULL,
        device_name VARCHAR(255) NOT NULL,
        device_type VARCHAR(255) NOT NULL,
        hub_device_id VARCHAR(255),
        enable_cloud_service BOOLEAN NOT NULL,
        enable_get_status BOOLEAN NOT NULL DEFAULT FALSE,
        UNIQUE KEY uq_device_id (device_id)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

const HUB_STATUS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS switchbot_hub_status (
        record_id INT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
        is_api_success BOOLEAN NOT NULL,
        timestamp DATETIME NOT NULL,
        device_id VARCHAR(255) NOT NULL,
        humidity INT,
        temperature DOUBLE,
        light_level INT,
        version VARCHAR(255),
        INDEX idx_device_time (device_id, timestamp)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

const PLUG_MINI_STATUS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS switchbot_plug_mini_status (
        record_id INT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
        is_api_success BOOLEAN NOT NULL,
        timestamp DATETIME NOT NULL,
        device_id VARCHAR(255) NOT NULL,
        voltage DOUBLE,
        version VARCHAR(255),
        weight DOUBLE,
        electricity_of_day DOUBLE,
        electric_current DOUBLE,
        power BOOLEAN,
        INDEX idx_device_time (device_id, timestamp)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

const METER_STATUS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS switchbot_meter_status (
        record_id INT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
        is_api_success BOOLEAN NOT NULL,
        timestamp DATETIME NOT NULL,
        device_id VARCHAR(255) NOT NULL,
        humidity INT,
        temperature DOUBLE,
        version VARCHAR(255),
        battery INT,
        INDEX idx_device_time (device_id, timestamp)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

impl MySqlDb {
    /// Ensure all four tables exist
    pub async fn ensure_tables(&self) -> Result<(), AppError> {
        for (name, ddl) in [
            ("switchbot_device_table", DEVICE_TABLE),
            ("switchbot_hub_status", HUB_STATUS_TABLE),
            ("switchbot_plug_mini_status", PLUG_MINI_STATUS_TABLE),
            ("switchbot_meter_status", METER_STATUS_TABLE),
        ] {
            sqlx::query(ddl).execute(self.pool()).await?;
            tracing::debug!("Table {} ready", name);
        }

        Ok(())
    }
}

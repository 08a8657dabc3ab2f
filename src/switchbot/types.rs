//! SwitchBot API v1.1 payload types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{
    DeviceKind, DeviceRecord, HubStatusRow, MeterStatusRow, PlugMiniStatusRow, StatusRecord,
};

/// `statusCode` value the API uses for success
pub const STATUS_SUCCESS: i64 = 100;

/// Response envelope shared by every endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub body: T,
}

// ============================================================================
// Devices
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceList {
    #[serde(default)]
    pub device_list: Vec<RemoteDevice>,
    #[serde(default)]
    pub infrared_remote_list: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDevice {
    pub device_id: String,
    #[serde(default)]
    pub device_name: String,
    #[serde(default)]
    pub device_type: String,
    #[serde(default)]
    pub hub_device_id: Option<String>,
    #[serde(default)]
    pub enable_cloud_service: bool,
}

impl RemoteDevice {
    pub fn to_record(&self, enable_get_status: bool) -> DeviceRecord {
        DeviceRecord {
            device_id: self.device_id.clone(),
            device_name: self.device_name.clone(),
            device_type: self.device_type.clone(),
            hub_device_id: self.hub_device_id.clone(),
            enable_cloud_service: self.enable_cloud_service,
            enable_get_status,
        }
    }
}

/// Body for `POST /devices/{id}/commands`
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCommand {
    pub command: String,
    pub parameter: serde_json::Value,
    pub command_type: String,
}

#[allow(dead_code)]
impl DeviceCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            parameter: serde_json::Value::String("default".to_string()),
            command_type: "command".to_string(),
        }
    }

    pub fn with_parameter(mut self, parameter: serde_json::Value) -> Self {
        self.parameter = parameter;
        self
    }

    pub fn custom(mut self) -> Self {
        self.command_type = "customize".to_string();
        self
    }
}

// ============================================================================
// Scenes
// ============================================================================

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub scene_id: String,
    #[serde(default)]
    pub scene_name: String,
}

// ============================================================================
// Device Status
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterReading {
    pub device_id: Option<String>,
    pub humidity: Option<i32>,
    pub temperature: Option<f64>,
    pub battery: Option<i32>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlugMiniReading {
    pub device_id: Option<String>,
    pub voltage: Option<f64>,
    pub weight: Option<f64>,
    pub electricity_of_day: Option<f64>,
    pub electric_current: Option<f64>,
    /// "on" / "off"
    pub power: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubReading {
    pub device_id: Option<String>,
    pub humidity: Option<i32>,
    pub temperature: Option<f64>,
    pub light_level: Option<i32>,
    pub version: Option<String>,
}

/// Status body decoded by device type
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceStatus {
    Meter(MeterReading),
    PlugMini(PlugMiniReading),
    Hub(HubReading),
    Unknown(String),
}

impl DeviceStatus {
    /// Decode a `GET /devices/{id}/status` body.
    ///
    /// Dispatches on the body's `deviceType`; `registered_type` is used when
    /// the body does not carry one.
    pub fn from_body(body: serde_json::Value, registered_type: &str) -> Result<Self, AppError> {
        let device_type = body
            .get("deviceType")
            .and_then(|v| v.as_str())
            .unwrap_or(registered_type)
            .to_string();

        let status = match DeviceKind::from_device_type(&device_type) {
            Some(DeviceKind::Meter) => DeviceStatus::Meter(serde_json::from_value(body)?),
            Some(DeviceKind::PlugMini) => DeviceStatus::PlugMini(serde_json::from_value(body)?),
            Some(DeviceKind::Hub) => DeviceStatus::Hub(serde_json::from_value(body)?),
            None => DeviceStatus::Unknown(device_type),
        };

        Ok(status)
    }

    /// Build the status row for this reading. `None` for unknown types.
    pub fn into_record(self, device_id: &str, timestamp: DateTime<Utc>) -> Option<StatusRecord> {
        let record = match self {
            DeviceStatus::Meter(r) => StatusRecord::Meter(MeterStatusRow {
                is_api_success: true,
                timestamp,
                device_id: r.device_id.unwrap_or_else(|| device_id.to_string()),
                humidity: r.humidity,
                temperature: r.temperature,
                battery: r.battery,
                version: r.version,
            }),
            DeviceStatus::PlugMini(r) => StatusRecord::PlugMini(PlugMiniStatusRow {
                is_api_success: true,
                timestamp,
                device_id: r.device_id.unwrap_or_else(|| device_id.to_string()),
                voltage: r.voltage,
                weight: r.weight,
                electricity_of_day: r.electricity_of_day,
                electric_current: r.electric_current,
                power: r.power.map(|p| p == "on"),
                version: r.version,
            }),
            DeviceStatus::Hub(r) => StatusRecord::Hub(HubStatusRow {
                is_api_success: true,
                timestamp,
                device_id: r.device_id.unwrap_or_else(|| device_id.to_string()),
                humidity: r.humidity,
                temperature: r.temperature,
                light_level: r.light_level,
                version: r.version,
            }),
            DeviceStatus::Unknown(_) => return None,
        };

        Some(record)
    }
}

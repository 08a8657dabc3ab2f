//! Data models for the device registry and status tables

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Device Registry
// ============================================================================

/// Row of `switchbot_device_table`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DeviceRecord {
    pub device_id: String,
    pub device_name: String,
    pub device_type: String,
    pub hub_device_id: Option<String>,
    pub enable_cloud_service: bool,
    /// Manually toggled; only enabled devices are polled for status
    pub enable_get_status: bool,
}

impl DeviceRecord {
    /// True when name, hub or cloud flag differ from `other`.
    /// `device_type` and `enable_get_status` are not compared.
    pub fn differs_from(&self, other: &DeviceRecord) -> bool {
        self.device_name != other.device_name
            || self.hub_device_id != other.hub_device_id
            || self.enable_cloud_service != other.enable_cloud_service
    }
}

/// A registered device selected for status polling
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StatusTarget {
    pub device_id: String,
    pub device_type: String,
}

// ============================================================================
// Status Tables
// ============================================================================

/// Device types that have a status table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Meter,
    PlugMini,
    Hub,
}

impl DeviceKind {
    /// Exact match against the vendor `deviceType` string
    pub fn from_device_type(s: &str) -> Option<Self> {
        match s {
            "Meter" => Some(DeviceKind::Meter),
            "Plug Mini (JP)" => Some(DeviceKind::PlugMini),
            "Hub 2" => Some(DeviceKind::Hub),
            _ => None,
        }
    }

    pub fn table_name(&self) -> &'static str {
        match self {
            DeviceKind::Meter => "switchbot_meter_status",
            DeviceKind::PlugMini => "switchbot_plug_mini_status",
            DeviceKind::Hub => "switchbot_hub_status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeterStatusRow {
    pub is_api_success: bool,
    pub timestamp: DateTime<Utc>,
    pub device_id: String,
    pub humidity: Option<i32>,
    pub temperature: Option<f64>,
    pub battery: Option<i32>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlugMiniStatusRow {
    pub is_api_success: bool,
    pub timestamp: DateTime<Utc>,
    pub device_id: String,
    pub voltage: Option<f64>,
    /// Power used today [W]
    pub weight: Option<f64>,
    /// Minutes in use today
    pub electricity_of_day: Option<f64>,
    /// Current draw [A]
    pub electric_current: Option<f64>,
    pub power: Option<bool>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HubStatusRow {
    pub is_api_success: bool,
    pub timestamp: DateTime<Utc>,
    pub device_id: String,
    pub humidity: Option<i32>,
    pub temperature: Option<f64>,
    /// 1-20
    pub light_level: Option<i32>,
    pub version: Option<String>,
}

/// One append-only status row, tagged by the table it belongs to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StatusRecord {
    Meter(MeterStatusRow),
    PlugMini(PlugMiniStatusRow),
    Hub(HubStatusRow),
}

impl StatusRecord {
    pub fn kind(&self) -> DeviceKind {
        match self {
            StatusRecord::Meter(_) => DeviceKind::Meter,
            StatusRecord::PlugMini(_) => DeviceKind::PlugMini,
            StatusRecord::Hub(_) => DeviceKind::Hub,
        }
    }

    pub fn device_id(&self) -> &str {
        match self {
            StatusRecord::Meter(row) => &row.device_id,
            StatusRecord::PlugMini(row) => &row.device_id,
            StatusRecord::Hub(row) => &row.device_id,
        }
    }

    #[cfg(test)]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            StatusRecord::Meter(row) => row.timestamp,
            StatusRecord::PlugMini(row) => row.timestamp,
            StatusRecord::Hub(row) => row.timestamp,
        }
    }
}

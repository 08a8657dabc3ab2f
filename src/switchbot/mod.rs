//! SwitchBot cloud API (v1.1) integration
//!
//! - `sign`: per-request HMAC header construction
//! - `client`: signed HTTP calls to the device and scene endpoints
//! - `types`: response envelope, device list and status payloads

pub mod client;
pub mod sign;
pub mod types;

pub use client::{SwitchBotApi, SwitchBotClient};
pub use types::DeviceStatus;

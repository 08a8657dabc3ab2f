//! Scripted SwitchBot API for reconcile tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AppError;
use crate::switchbot::types::{DeviceList, RemoteDevice};
use crate::switchbot::SwitchBotApi;

pub fn remote(id: &str, name: &str, device_type: &str, hub: Option<&str>) -> RemoteDevice {
    RemoteDevice {
        device_id: id.to_string(),
        device_name: name.to_string(),
        device_type: device_type.to_string(),
        hub_device_id: hub.map(str::to_string),
        enable_cloud_service: true,
    }
}

enum StatusReply {
    Body(serde_json::Value),
    ConnectionError,
}

#[derive(Default)]
pub struct FakeApi {
    devices: Mutex<Vec<RemoteDevice>>,
    list_error: Option<(u16, String)>,
    statuses: Mutex<HashMap<String, StatusReply>>,
    /// Device ids in the order their status was requested
    pub status_calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_devices(self, devices: Vec<RemoteDevice>) -> Self {
        self.set_devices(devices);
        self
    }

    pub fn with_list_error(mut self, status: u16, body: &str) -> Self {
        self.list_error = Some((status, body.to_string()));
        self
    }

    pub fn with_status(self, device_id: &str, body: serde_json::Value) -> Self {
        self.statuses
            .lock()
            .unwrap()
            .insert(device_id.to_string(), StatusReply::Body(body));
        self
    }

    pub fn with_connection_error(self, device_id: &str) -> Self {
        self.statuses
            .lock()
            .unwrap()
            .insert(device_id.to_string(), StatusReply::ConnectionError);
        self
    }

    pub fn set_devices(&self, devices: Vec<RemoteDevice>) {
        *self.devices.lock().unwrap() = devices;
    }
}

#[async_trait]
impl SwitchBotApi for FakeApi {
    async fn list_devices(&self) -> Result<DeviceList, AppError> {
        if let Some((status, body)) = &self.list_error {
            return Err(AppError::Api {
                status: *status,
                body: body.clone(),
            });
        }
        Ok(DeviceList {
            device_list: self.devices.lock().unwrap().clone(),
            infrared_remote_list: vec![],
        })
    }

    async fn get_device_status(&self, device_id: &str) -> Result<serde_json::Value, AppError> {
        self.status_calls.lock().unwrap().push(device_id.to_string());
        match self.statuses.lock().unwrap().get(device_id) {
            Some(StatusReply::Body(body)) => Ok(body.clone()),
            Some(StatusReply::ConnectionError) => Err(AppError::Request(format!(
                "GET /devices/{}/status failed: connection refused",
                device_id
            ))),
            None => Err(AppError::Api {
                status: 404,
                body: "not found".to_string(),
            }),
        }
    }
}

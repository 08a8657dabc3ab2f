//! SwitchBot cloud API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;

use super::sign::Signer;
use super::types::{ApiResponse, DeviceCommand, DeviceList, Scene, STATUS_SUCCESS};
use crate::config::SwitchBotConfig;
use crate::error::AppError;

/// The part of the API the reconcile loop depends on
#[async_trait]
pub trait SwitchBotApi: Send + Sync {
    /// `GET /devices`
    async fn list_devices(&self) -> Result<DeviceList, AppError>;

    /// `GET /devices/{id}/status`, returning the undecoded `body`
    async fn get_device_status(&self, device_id: &str) -> Result<serde_json::Value, AppError>;
}

pub struct SwitchBotClient {
    http_client: Client,
    base_url: String,
    signer: Signer,
}

impl SwitchBotClient {
    pub fn new(config: &SwitchBotConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| AppError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            signer: Signer::new(&config.token, &config.secret_key),
        })
    }

    /// Send one signed request and unwrap the response envelope
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        json_body: Option<&serde_json::Value>,
    ) -> Result<T, AppError> {
        let url = format!("{}{}", self.base_url, path);
        let headers = self.signer.sign_now()?.to_header_map()?;

        let mut req = self.http_client.request(method.clone(), &url).headers(headers);
        if let Some(body) = json_body {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| AppError::Request(format!("{} {} failed: {}", method, path, e)))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AppError::Request(format!("{} {} body read failed: {}", method, path, e)))?;

        if status != StatusCode::OK {
            return Err(AppError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(&text)?;
        if envelope.status_code != STATUS_SUCCESS {
            return Err(AppError::Vendor {
                code: envelope.status_code,
                message: envelope.message,
            });
        }

        tracing::trace!("[SwitchBot] {} {} ok", method, path);
        Ok(serde_json::from_value(envelope.body)?)
    }

    /// `POST /devices/{id}/commands`
    #[allow(dead_code)]
    pub async fn exec_device_command(
        &self,
        device_id: &str,
        command: &DeviceCommand,
    ) -> Result<serde_json::Value, AppError> {
        let payload = serde_json::to_value(command)?;
        self.request(
            Method::POST,
            &format!("/devices/{}/commands", device_id),
            Some(&payload),
        )
        .await
    }

    /// `GET /scenes`
    #[allow(dead_code)]
    pub async fn list_scenes(&self) -> Result<Vec<Scene>, AppError> {
        self.request(Method::GET, "/scenes", None).await
    }

    /// `POST /scenes/{id}/execute`
    #[allow(dead_code)]
    pub async fn exec_scene(&self, scene_id: &str) -> Result<serde_json::Value, AppError> {
        self.request(Method::POST, &format!("/scenes/{}/execute", scene_id), None)
            .await
    }
}

#[async_trait]
impl SwitchBotApi for SwitchBotClient {
    async fn list_devices(&self) -> Result<DeviceList, AppError> {
        self.request(Method::GET, "/devices", None).await
    }

    async fn get_device_status(&self, device_id: &str) -> Result<serde_json::Value, AppError> {
        self.request(Method::GET, &format!("/devices/{}/status", device_id), None)
            .await
    }
}

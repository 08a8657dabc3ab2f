//! Configuration module
//!
//! Sources, later ones winning:
//! `config/default.*` → `SWITCHBOT_COLLECTOR__*` env vars → the plain
//! `SWITCHBOT_API_TOKEN` / `SWITCHBOT_API_SECRET_KEY` / `DATABASE_URL` vars.

use std::time::Duration;

use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://api.switch-bot.com/v1.1";

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * 60;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub switchbot: SwitchBotConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwitchBotConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Unset means the HTTP client default (no timeout)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for SwitchBotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            secret_key: String::new(),
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub mysql_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            mysql_url: None,
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_registration_hours")]
    pub registration_interval_hours: u64,
    #[serde(default = "default_status_minutes")]
    pub status_interval_minutes: u64,
    #[serde(default = "default_true")]
    pub run_on_start: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            registration_interval_hours: default_registration_hours(),
            status_interval_minutes: default_status_minutes(),
            run_on_start: true,
        }
    }
}

impl ScheduleConfig {
    pub fn registration_interval(&self) -> Duration {
        Duration::from_secs(self.registration_interval_hours.saturating_mul(SECS_PER_HOUR))
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_secs(self.status_interval_minutes.saturating_mul(SECS_PER_MINUTE))
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_registration_hours() -> u64 {
    12
}

fn default_status_minutes() -> u64 {
    1
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("SWITCHBOT_COLLECTOR").separator("__"))
            .set_override_option("switchbot.token", std::env::var("SWITCHBOT_API_TOKEN").ok())?
            .set_override_option(
                "switchbot.secret_key",
                std::env::var("SWITCHBOT_API_SECRET_KEY").ok(),
            )?
            .set_override_option("database.mysql_url", std::env::var("DATABASE_URL").ok())?;

        Ok(Self::from_settings(builder.build()?)?)
    }

    /// Deserialize and validate an already-built settings tree
    pub fn from_settings(settings: config::Config) -> Result<Self, AppError> {
        let config: Config = settings
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.switchbot.token.trim().is_empty() {
            return Err(AppError::Config("SWITCHBOT_API_TOKEN is not set".to_string()));
        }
        if self.switchbot.secret_key.trim().is_empty() {
            return Err(AppError::Config(
                "SWITCHBOT_API_SECRET_KEY is not set".to_string(),
            ));
        }

        let base = url::Url::parse(&self.switchbot.base_url)
            .map_err(|e| AppError::Config(format!("Invalid base_url: {}", e)))?;
        if base.scheme() != "https" && base.scheme() != "http" {
            return Err(AppError::Config(format!(
                "Unsupported base_url scheme: {}",
                base.scheme()
            )));
        }

        if self.database.mysql_url.as_deref().map_or(true, str::is_empty) {
            return Err(AppError::Config("MySQL URL not configured".to_string()));
        }

        if self.schedule.registration_interval_hours == 0 || self.schedule.status_interval_minutes == 0
        {
            return Err(AppError::Config(
                "Schedule intervals must be greater than zero".to_string(),
            ));
        }
        if self
            .schedule
            .registration_interval_hours
            .checked_mul(SECS_PER_HOUR)
            .is_none()
            || self
                .schedule
                .status_interval_minutes
                .checked_mul(SECS_PER_MINUTE)
                .is_none()
        {
            return Err(AppError::Config(
                "Schedule interval is too large".to_string(),
            ));
        }

        Ok(())
    }
}

//! SwitchBot Collector
//!
//! Polls the SwitchBot cloud API on a fixed schedule, keeps a MySQL device
//! registry in sync with the account's device list and appends per-device
//! status rows.

mod config;
mod db;
mod error;
mod models;
mod reconcile;
mod scheduler;
mod switchbot;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::MySqlDb;
use crate::reconcile::{Collector, DeviceRegistrationJob, StatusPollJob};
use crate::scheduler::Scheduler;
use crate::switchbot::SwitchBotClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "switchbot_collector=info".into()),
        )
        .init();

    tracing::info!("Starting SwitchBot Collector...");

    // Load configuration
    let config = config::Config::load()?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let db = Arc::new(MySqlDb::connect(&config.database).await?);
    db.ensure_tables().await?;
    tracing::info!("Database tables ready");

    let client = Arc::new(SwitchBotClient::new(&config.switchbot)?);
    let collector = Arc::new(Collector::new(client, db));

    // Registration first so new devices are polled on the same tick
    let scheduler = Scheduler::new(Duration::from_secs(1), config.schedule.run_on_start)
        .every(
            config.schedule.registration_interval(),
            Arc::new(DeviceRegistrationJob::new(collector.clone())),
        )
        .every(
            config.schedule.status_interval(),
            Arc::new(StatusPollJob::new(collector)),
        );

    scheduler.run_until(shutdown_signal()).await;

    tracing::info!("SwitchBot Collector stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

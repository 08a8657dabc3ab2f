//! In-memory store for reconcile tests
//!
//! A session works on a copy of the committed state; `commit` swaps the copy
//! in, `rollback` or drop throws it away.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{DeviceStore, StoreSession};
use crate::error::AppError;
use crate::models::{DeviceRecord, StatusRecord, StatusTarget};

#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    /// Keyed by device_id, kept in insertion order via `seq`
    pub devices: BTreeMap<String, (u64, DeviceRecord)>,
    pub statuses: Vec<StatusRecord>,
    /// Number of committed upserts and inserts
    pub writes: usize,
    seq: u64,
}

impl MemoryState {
    pub fn device(&self, device_id: &str) -> Option<&DeviceRecord> {
        self.devices.get(device_id).map(|(_, d)| d)
    }

    fn ordered_devices(&self) -> Vec<&DeviceRecord> {
        let mut devices: Vec<_> = self.devices.values().collect();
        devices.sort_by_key(|(seq, _)| *seq);
        devices.into_iter().map(|(_, d)| d).collect()
    }
}

#[derive(Debug, Default)]
struct Counters {
    opened: usize,
    commits: usize,
    rollbacks: usize,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    counters: Arc<Mutex<Counters>>,
    fail_status_inserts: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `insert_status` call fails with a database error
    pub fn with_failing_status_inserts(mut self) -> Self {
        self.fail_status_inserts = true;
        self
    }

    pub fn seed_device(&self, device: DeviceRecord) {
        let mut state = self.state.lock().unwrap();
        state.seq += 1;
        let seq = state.seq;
        state.devices.insert(device.device_id.clone(), (seq, device));
    }

    pub fn snapshot(&self) -> MemoryState {
        self.state.lock().unwrap().clone()
    }

    pub fn commits(&self) -> usize {
        self.counters.lock().unwrap().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.counters.lock().unwrap().rollbacks
    }

    /// Sessions opened but not yet committed or rolled back
    pub fn open_sessions(&self) -> usize {
        let c = self.counters.lock().unwrap();
        c.opened - c.commits - c.rollbacks
    }
}

#[async_trait]
impl DeviceStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreSession>, AppError> {
        self.counters.lock().unwrap().opened += 1;
        Ok(Box::new(MemorySession {
            working: self.snapshot(),
            store: self.clone(),
            finished: false,
        }))
    }
}

struct MemorySession {
    working: MemoryState,
    store: MemoryStore,
    finished: bool,
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        // Dropped without commit/rollback counts as a rollback
        if !self.finished {
            self.store.counters.lock().unwrap().rollbacks += 1;
        }
    }
}

#[async_trait]
impl StoreSession for MemorySession {
    async fn find_device_ids(&mut self) -> Result<Vec<String>, AppError> {
        Ok(self
            .working
            .ordered_devices()
            .into_iter()
            .map(|d| d.device_id.clone())
            .collect())
    }

    async fn find_device(&mut self, device_id: &str) -> Result<Option<DeviceRecord>, AppError> {
        Ok(self.working.device(device_id).cloned())
    }

    async fn find_status_targets(&mut self) -> Result<Vec<StatusTarget>, AppError> {
        Ok(self
            .working
            .ordered_devices()
            .into_iter()
            .map(|d| StatusTarget {
                device_id: d.device_id.clone(),
                device_type: d.device_type.clone(),
            })
            .collect())
    }

    async fn upsert_device(&mut self, device: &DeviceRecord) -> Result<(), AppError> {
        let state = &mut self.working;
        match state.devices.get_mut(&device.device_id) {
            Some((_, existing)) => {
                existing.device_name = device.device_name.clone();
                existing.hub_device_id = device.hub_device_id.clone();
                existing.enable_cloud_service = device.enable_cloud_service;
            }
            None => {
                state.seq += 1;
                let seq = state.seq;
                state
                    .devices
                    .insert(device.device_id.clone(), (seq, device.clone()));
            }
        }
        state.writes += 1;
        Ok(())
    }

    async fn insert_status(&mut self, record: &StatusRecord) -> Result<(), AppError> {
        if self.store.fail_status_inserts {
            return Err(AppError::Database(sqlx::Error::PoolClosed));
        }
        self.working.statuses.push(record.clone());
        self.working.writes += 1;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let mut session = self;
        *session.store.state.lock().unwrap() = std::mem::take(&mut session.working);
        session.store.counters.lock().unwrap().commits += 1;
        session.finished = true;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), AppError> {
        let mut session = self;
        session.store.counters.lock().unwrap().rollbacks += 1;
        session.finished = true;
        Ok(())
    }
}

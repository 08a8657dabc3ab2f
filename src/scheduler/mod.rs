//! Cooperative job scheduler
//!
//! One loop ticks every `tick` and runs each due job to completion before
//! looking at the next one, so no two jobs ever run at the same time and a
//! job never overlaps itself.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{interval, Instant, MissedTickBehavior};

#[async_trait]
pub trait ScheduledJob: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run one cycle. Errors are handled inside the job.
    async fn run(&self);
}

struct JobSlot {
    job: Arc<dyn ScheduledJob>,
    period: Duration,
    next_run: Instant,
}

pub struct Scheduler {
    tick: Duration,
    run_on_start: bool,
    jobs: Vec<JobSlot>,
}

impl Scheduler {
    pub fn new(tick: Duration, run_on_start: bool) -> Self {
        Self {
            tick,
            run_on_start,
            jobs: Vec::new(),
        }
    }

    /// Register a job. Jobs due on the same tick run in registration order.
    pub fn every(mut self, period: Duration, job: Arc<dyn ScheduledJob>) -> Self {
        let now = Instant::now();
        let next_run = if self.run_on_start { now } else { now + period };
        self.jobs.push(JobSlot {
            job,
            period,
            next_run,
        });
        self
    }

    /// Run until `shutdown` resolves. A job already running is not interrupted.
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        for slot in &self.jobs {
            tracing::info!(
                "[Scheduler] Job {} every {}s",
                slot.job.name(),
                slot.period.as_secs()
            );
        }

        let mut ticker = interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!("[Scheduler] Shutdown requested, stopping");
                    break;
                }
                _ = ticker.tick() => {
                    self.run_pending().await;
                }
            }
        }
    }

    async fn run_pending(&mut self) {
        for slot in &mut self.jobs {
            let started = Instant::now();
            if started < slot.next_run {
                continue;
            }

            tracing::debug!("[Scheduler] Running {}", slot.job.name());
            slot.job.run().await;
            slot.next_run = started + slot.period;
            tracing::debug!(
                "[Scheduler] {} finished in {}ms",
                slot.job.name(),
                started.elapsed().as_millis()
            );
        }
    }
}

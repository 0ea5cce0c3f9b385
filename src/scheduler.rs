/// Minute-boundary refresh scheduler.
/// Fires one tick at the top of every minute so clock faces redraw exactly
/// when the displayed minute changes. Missed boundaries are skipped, never
/// replayed in a burst.
use chrono::{Timelike, Utc};
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::error::SchedulerError;

/// Subscribers that fall behind drop old ticks instead of queueing them.
const TICK_BUFFER: usize = 4;

/// Marker delivered once per minute boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick;

pub struct RefreshScheduler {
    tx: broadcast::Sender<Tick>,
    task: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(TICK_BUFFER);
        Self { tx, task: None }
    }

    /// Get a receiver for minute ticks. Valid before or after `start`.
    pub fn subscribe(&self) -> broadcast::Receiver<Tick> {
        self.tx.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Arm the timer: first tick at the next minute boundary, then every
    /// 60 seconds. Fails when already running or without a runtime.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        if self.task.is_some() {
            return Err(SchedulerError::AlreadyStarted);
        }
        let handle = Handle::try_current()?;
        let delay = delay_to_next_minute(Utc::now().second());
        info!("refresh scheduler armed, first tick in {}s", delay.as_secs());
        self.task = Some(handle.spawn(run_ticker(self.tx.clone(), delay)));
        Ok(())
    }

    /// Stop ticking. Subscribers stay subscribed and `start` may be called
    /// again later.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            info!("refresh scheduler stopped");
        }
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Seconds until the next :00, from the current second of the minute.
fn delay_to_next_minute(current_second: u32) -> Duration {
    Duration::from_secs(u64::from(60 - current_second.min(59)))
}

async fn run_ticker(tx: broadcast::Sender<Tick>, initial_delay: Duration) {
    let mut interval = time::interval_at(Instant::now() + initial_delay, Duration::from_secs(60));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        debug!("minute boundary tick");
        // Err means nobody is subscribed right now; keep ticking.
        let _ = tx.send(Tick);
    }
}

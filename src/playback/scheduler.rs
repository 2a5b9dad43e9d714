use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::core::ScriptEntry;
use crate::error::{FeedError, Result};
use crate::playback::clamp_speed;

/// Arms timed deliveries of script entries
///
/// Entries are kept in one queue ordered by delay and drained by a single
/// timer task that sleeps until the next deadline. Every entry fires no
/// earlier than its (speed-scaled) delay after `start` was called. Entries
/// sharing a delay come out in an unspecified order.
pub struct Scheduler;

impl Scheduler {
    /// Start delivering `entries`, invoking `on_deliver` as each one comes due.
    ///
    /// Fails without arming anything if no tokio runtime is reachable.
    pub fn start<F>(
        entries: &[ScriptEntry],
        speed: f64,
        mut on_deliver: F,
    ) -> Result<ScheduleHandle>
    where
        F: FnMut(&ScriptEntry) + Send + 'static,
    {
        let runtime = Handle::try_current()
            .map_err(|e| FeedError::TimerUnavailable(e.to_string()))?;

        let speed = clamp_speed(speed);
        let started = Instant::now();
        let mut queue = entries.to_vec();
        queue.sort_by_key(|entry| entry.delay_ms);

        let cancelled = Arc::new(AtomicBool::new(false));
        let remaining = Arc::new(AtomicUsize::new(queue.len()));

        let task_cancelled = cancelled.clone();
        let task_remaining = remaining.clone();
        let task = runtime.spawn(async move {
            for entry in queue {
                let deadline = started + scaled_delay(entry.delay_ms, speed);
                tokio::time::sleep_until(deadline).await;

                if task_cancelled.load(Ordering::SeqCst) {
                    break;
                }
                trace!("Delivering entry at +{}ms", entry.delay_ms);
                on_deliver(&entry);
                task_remaining.fetch_sub(1, Ordering::SeqCst);
            }
        });

        debug!("Scheduler armed {} deliveries at {:.2}x", remaining.load(Ordering::SeqCst), speed);

        Ok(ScheduleHandle {
            cancelled,
            remaining,
            task,
        })
    }
}

/// Delay of an entry once the playback speed is applied
pub fn scaled_delay(delay_ms: u64, speed: f64) -> Duration {
    Duration::from_millis(delay_ms).div_f64(clamp_speed(speed))
}

/// Handle to a running schedule; cancels outstanding deliveries when dropped
pub struct ScheduleHandle {
    cancelled: Arc<AtomicBool>,
    remaining: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl ScheduleHandle {
    /// Suppress every delivery that has not fired yet.
    ///
    /// Calling this more than once, or after the schedule drained, does nothing.
    pub fn cancel(&self) {
        let pending = self.pending();
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            debug!("Cancelling schedule with {} pending deliveries", pending);
        }
        self.task.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Whether no further delivery can happen
    pub fn is_finished(&self) -> bool {
        self.is_cancelled() || self.task.is_finished()
    }

    /// Deliveries that are still due to fire
    pub fn pending(&self) -> usize {
        if self.is_cancelled() {
            0
        } else {
            self.remaining.load(Ordering::SeqCst)
        }
    }
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

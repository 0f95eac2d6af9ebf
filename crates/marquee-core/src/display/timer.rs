//! L4 Atomic Layer: Owned, cancellable periodic timer
//!
//! Each controller owns exactly one `PeriodicTimer`. The timer is a tokio task
//! driven by an `Interval` whose first tick lands one period after `spawn`.
//! Cancelling (explicitly or on drop) closes a gate that the tick handler
//! checks under the same lock, so no tick callback can run after `cancel`
//! returns, even one already woken in the current turn of the scheduler.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

fn lock(gate: &Mutex<bool>) -> MutexGuard<'_, bool> {
    gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Handle to a running periodic callback. Dropping it cancels the callback.
#[derive(Debug)]
pub struct PeriodicTimer {
    label: &'static str,
    period: Duration,
    /// true while ticks may still be delivered
    gate: Arc<Mutex<bool>>,
    task: Option<JoinHandle<()>>,
}

impl PeriodicTimer {
    /// Spawn a timer calling `on_tick` every `period`, first call after one period.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<F>(label: &'static str, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let gate = Arc::new(Mutex::new(true));
        // Anchor the cadence now, not when the task is first polled
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

        let task_gate = gate.clone();
        let task = tokio::spawn(async move {
            loop {
                interval.tick().await;
                {
                    let open = lock(&task_gate);
                    if !*open {
                        break;
                    }
                    on_tick();
                }
            }
        });

        debug!(timer = label, period_ms = period.as_millis() as u64, "Timer started");

        Self {
            label,
            period,
            gate,
            task: Some(task),
        }
    }

    /// Whether ticks may still be delivered
    pub fn is_active(&self) -> bool {
        *lock(&self.gate)
    }

    /// Stop delivering ticks. Returns false if the timer was already cancelled.
    pub fn cancel(&mut self) -> bool {
        let was_active = {
            let mut open = lock(&self.gate);
            std::mem::replace(&mut *open, false)
        };
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if was_active {
            debug!(
                timer = self.label,
                period_ms = self.period.as_millis() as u64,
                "Timer cancelled"
            );
        }
        was_active
    }
}

impl Drop for PeriodicTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

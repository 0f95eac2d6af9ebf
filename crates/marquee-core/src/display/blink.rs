//! L3 Molecular Layer: Blinking caret
//!
//! The caret owns its own timer. It is never driven from the text rotation
//! timer, so its phase depends only on when it was started.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::lifecycle::Lifecycle;
use super::timer::PeriodicTimer;
use crate::{Error, Result};

/// Toggles a `visible` flag every interval, starting from visible
pub struct CursorBlinkController {
    state: Lifecycle,
    tx: Arc<watch::Sender<bool>>,
    timer: Option<PeriodicTimer>,
}

impl Default for CursorBlinkController {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorBlinkController {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self {
            state: Lifecycle::Idle,
            tx: Arc::new(tx),
            timer: None,
        }
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub fn is_visible(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn start(&mut self, interval_ms: u64) -> Result<()> {
        match self.state {
            Lifecycle::Running => {
                warn!("CursorBlinkController::start called while running; ignoring");
                return Ok(());
            }
            Lifecycle::Stopped => return Err(Error::ControllerStopped),
            Lifecycle::Idle => {}
        }
        if interval_ms == 0 {
            self.state = Lifecycle::Stopped;
            return Err(Error::InvalidConfig(
                "cursor interval must be greater than zero".to_string(),
            ));
        }

        self.tx.send_replace(true);
        let tx = self.tx.clone();
        self.timer = Some(PeriodicTimer::spawn(
            "cursor-blink",
            Duration::from_millis(interval_ms),
            move || {
                tx.send_modify(|visible| *visible = !*visible);
            },
        ));
        self.state = Lifecycle::Running;
        debug!(interval_ms, "Cursor blink started");
        Ok(())
    }

    /// Cancel toggling. Idempotent; the flag keeps its last value.
    pub fn stop(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
            debug!("Cursor blink stopped");
        }
        self.state = Lifecycle::Stopped;
    }
}

impl Drop for CursorBlinkController {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    async fn advance_ms(ms: u64) {
        time::advance(Duration::from_millis(ms)).await;
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_blink_timeline() {
        let mut cursor = CursorBlinkController::new();
        cursor.start(500).unwrap();
        assert!(cursor.is_visible());

        advance_ms(500).await;
        assert!(!cursor.is_visible());

        advance_ms(500).await;
        assert!(cursor.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_rejected() {
        let mut cursor = CursorBlinkController::new();
        assert!(matches!(cursor.start(0), Err(Error::InvalidConfig(_))));
        assert_eq!(cursor.state(), Lifecycle::Stopped);
        assert!(matches!(cursor.start(500), Err(Error::ControllerStopped)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_phase() {
        let mut cursor = CursorBlinkController::new();
        cursor.start(500).unwrap();
        advance_ms(500).await;
        assert!(!cursor.is_visible());

        cursor.stop();
        cursor.stop();
        advance_ms(5_000).await;
        assert!(!cursor.is_visible());
        assert!(matches!(cursor.start(500), Err(Error::ControllerStopped)));
    }
}

//! L3 Molecular Layer: Timed rotation through a content sequence

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, trace, warn};

use super::lifecycle::Lifecycle;
use super::sequence::ContentSequence;
use super::timer::PeriodicTimer;
use crate::{Error, Result};

/// Animation key for the displayed value.
///
/// `generation` identifies the controller instance (bumped on every
/// reconfiguration), `step` counts visible advances within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TransitionToken {
    pub generation: u64,
    pub step: u64,
}

/// Published rotation state: the sequence and the index into it
#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    sequence: ContentSequence,
    index: usize,
    token: TransitionToken,
}

impl Rotation {
    pub fn new(sequence: ContentSequence, generation: u64) -> Self {
        Self {
            sequence,
            index: 0,
            token: TransitionToken {
                generation,
                step: 0,
            },
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self) -> &str {
        self.sequence.get(self.index)
    }

    pub fn token(&self) -> TransitionToken {
        self.token
    }

    pub fn sequence(&self) -> &ContentSequence {
        &self.sequence
    }

    /// Move to `(index + 1) mod len`. Returns false for single-entry sequences,
    /// which never change.
    pub fn advance(&mut self) -> bool {
        if self.sequence.is_static() {
            return false;
        }
        self.index = (self.index + 1) % self.sequence.len();
        self.token.step += 1;
        true
    }
}

/// Advances an index through a fixed sequence at a fixed cadence until stopped.
///
/// The controller is the only writer of its `Rotation`; readers obtain a
/// `watch::Receiver` from [`subscribe`](Self::subscribe). The value is `None`
/// until `start` publishes index 0.
pub struct CyclingTextController {
    state: Lifecycle,
    generation: u64,
    tx: Arc<watch::Sender<Option<Rotation>>>,
    timer: Option<PeriodicTimer>,
}

impl Default for CyclingTextController {
    fn default() -> Self {
        Self::new()
    }
}

impl CyclingTextController {
    pub fn new() -> Self {
        Self::with_generation(0)
    }

    /// Create a controller whose tokens carry `generation`
    pub fn with_generation(generation: u64) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            state: Lifecycle::Idle,
            generation,
            tx: Arc::new(tx),
            timer: None,
        }
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Rotation>> {
        self.tx.subscribe()
    }

    /// Snapshot of the currently published rotation
    pub fn current(&self) -> Option<Rotation> {
        self.tx.borrow().clone()
    }

    /// Publish index 0 and begin advancing every `interval_ms`.
    ///
    /// Starting a running controller is a logged no-op. Starting a stopped
    /// controller fails with [`Error::ControllerStopped`], and a rejected
    /// configuration stops the controller.
    pub fn start<I, S>(&mut self, sequence: I, interval_ms: u64) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.state {
            Lifecycle::Running => {
                warn!("CyclingTextController::start called while running; ignoring");
                return Ok(());
            }
            Lifecycle::Stopped => return Err(Error::ControllerStopped),
            Lifecycle::Idle => {}
        }

        let checked = if interval_ms == 0 {
            Err(Error::InvalidConfig(
                "text interval must be greater than zero".to_string(),
            ))
        } else {
            ContentSequence::new(sequence)
        };
        // A rejected configuration ends this instance
        let sequence = match checked {
            Ok(sequence) => sequence,
            Err(e) => {
                self.state = Lifecycle::Stopped;
                warn!(error = %e, "Text rotation rejected its configuration");
                return Err(e);
            }
        };

        info!(
            entries = sequence.len(),
            interval_ms,
            generation = self.generation,
            "Text rotation started"
        );

        self.tx
            .send_replace(Some(Rotation::new(sequence, self.generation)));

        let tx = self.tx.clone();
        self.timer = Some(PeriodicTimer::spawn(
            "cycling-text",
            Duration::from_millis(interval_ms),
            move || {
                tx.send_if_modified(|rotation| match rotation {
                    Some(rotation) => {
                        let changed = rotation.advance();
                        if changed {
                            trace!(index = rotation.index(), "Text rotation tick");
                        }
                        changed
                    }
                    None => false,
                });
            },
        ));
        self.state = Lifecycle::Running;
        Ok(())
    }

    /// Cancel ticking. Idempotent and valid from any state; the last published
    /// value stays readable.
    pub fn stop(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
            info!(generation = self.generation, "Text rotation stopped");
        }
        self.state = Lifecycle::Stopped;
    }
}

impl Drop for CyclingTextController {
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

    fn index_of(controller: &CyclingTextController) -> usize {
        controller.current().map(|r| r.index()).unwrap()
    }

    #[test]
    fn test_rotation_wraps_around() {
        let seq = ContentSequence::new(["a", "b", "c"]).unwrap();
        let mut rotation = Rotation::new(seq, 0);
        let mut visited = vec![rotation.index()];
        for _ in 0..6 {
            assert!(rotation.advance());
            visited.push(rotation.index());
        }
        assert_eq!(visited, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(rotation.token().step, 6);
    }

    #[test]
    fn test_single_entry_never_changes() {
        let seq = ContentSequence::new(["only"]).unwrap();
        let mut rotation = Rotation::new(seq, 3);
        for _ in 0..10 {
            assert!(!rotation.advance());
        }
        assert_eq!(rotation.value(), "only");
        assert_eq!(rotation.token(), TransitionToken { generation: 3, step: 0 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_publishes_first_entry() {
        let mut controller = CyclingTextController::new();
        assert!(controller.current().is_none());

        controller.start(["a", "b"], 1000).unwrap();
        assert_eq!(controller.state(), Lifecycle::Running);
        let rotation = controller.current().unwrap();
        assert_eq!(rotation.index(), 0);
        assert_eq!(rotation.value(), "a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_config_rejected() {
        let mut controller = CyclingTextController::new();
        let err = controller.start(Vec::<String>::new(), 1000).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert_eq!(controller.state(), Lifecycle::Stopped);
        assert!(controller.current().is_none());

        let mut controller = CyclingTextController::new();
        let err = controller.start(["a"], 0).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_config_is_final() {
        let mut controller = CyclingTextController::new();
        assert!(controller.start(["a"], 0).is_err());
        assert!(matches!(
            controller.start(["a", "b"], 100),
            Err(Error::ControllerStopped)
        ));
        assert!(controller.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_visit_indices_in_order() {
        let mut controller = CyclingTextController::new();
        controller.start(["a", "b", "c"], 100).unwrap();

        let mut visited = vec![index_of(&controller)];
        for _ in 0..6 {
            advance_ms(100).await;
            visited.push(index_of(&controller));
        }
        assert_eq!(visited, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_does_not_add_timer() {
        let mut controller = CyclingTextController::new();
        controller.start(["a", "b", "c"], 100).unwrap();
        controller.start(["x", "y"], 10).unwrap();

        advance_ms(100).await;
        let rotation = controller.current().unwrap();
        assert_eq!(rotation.value(), "b");
        assert_eq!(rotation.token().step, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_idempotent_and_final() {
        let mut controller = CyclingTextController::new();
        controller.start(["a", "b"], 100).unwrap();
        advance_ms(100).await;

        controller.stop();
        controller.stop();
        assert_eq!(controller.state(), Lifecycle::Stopped);
        let frozen = controller.current();

        advance_ms(1_000).await;
        assert_eq!(controller.current(), frozen);

        let err = controller.start(["a"], 100).unwrap_err();
        assert!(matches!(err, Error::ControllerStopped));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_from_idle() {
        let mut controller = CyclingTextController::new();
        controller.stop();
        assert_eq!(controller.state(), Lifecycle::Stopped);
        assert!(controller.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_sees_changes() {
        let mut controller = CyclingTextController::with_generation(7);
        let mut rx = controller.subscribe();
        controller.start(["a", "b"], 100).unwrap();
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        advance_ms(100).await;
        assert!(rx.has_changed().unwrap());
        let rotation = rx.borrow_and_update().clone().unwrap();
        assert_eq!(rotation.value(), "b");
        assert_eq!(rotation.token(), TransitionToken { generation: 7, step: 1 });
    }
}

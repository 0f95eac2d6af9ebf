//! L2 Organism Layer: Scoped controller lifecycle
//!
//! A `MountBinding` pairs every start with exactly one stop. It starts a fresh
//! controller on `mount`, stops it on `unmount`, replaces it on a changed
//! `reconfigure`, and unmounts on drop so a discarded host never leaves a
//! timer running.

use std::fmt::Debug;

use tracing::{debug, info};

use super::blink::CursorBlinkController;
use super::cycling::CyclingTextController;
use crate::Result;

/// A one-shot controller the binding can launch and stop
pub trait Controller: Sized {
    type Config: Clone + PartialEq + Debug;

    /// Construct a fresh controller and start it
    fn launch(config: &Self::Config, generation: u64) -> Result<Self>;

    fn stop(&mut self);
}

/// Text rotation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCadence {
    pub content: Vec<String>,
    pub interval_ms: u64,
}

impl Controller for CyclingTextController {
    type Config = TextCadence;

    fn launch(config: &TextCadence, generation: u64) -> Result<Self> {
        let mut controller = CyclingTextController::with_generation(generation);
        controller.start(config.content.iter().cloned(), config.interval_ms)?;
        Ok(controller)
    }

    fn stop(&mut self) {
        CyclingTextController::stop(self);
    }
}

impl Controller for CursorBlinkController {
    /// Blink interval in milliseconds
    type Config = u64;

    fn launch(interval_ms: &u64, _generation: u64) -> Result<Self> {
        let mut controller = CursorBlinkController::new();
        controller.start(*interval_ms)?;
        Ok(controller)
    }

    fn stop(&mut self) {
        CursorBlinkController::stop(self);
    }
}

pub struct MountBinding<C: Controller> {
    label: &'static str,
    config: Option<C::Config>,
    active: Option<C>,
    generation: u64,
    starts: u64,
    stops: u64,
}

impl<C: Controller> MountBinding<C> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            config: None,
            active: None,
            generation: 0,
            starts: 0,
            stops: 0,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.active.is_some()
    }

    pub fn controller(&self) -> Option<&C> {
        self.active.as_ref()
    }

    pub fn config(&self) -> Option<&C::Config> {
        self.config.as_ref()
    }

    /// Generation handed to the most recently launched controller
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn starts(&self) -> u64 {
        self.starts
    }

    pub fn stops(&self) -> u64 {
        self.stops
    }

    /// Activate with `config`. Mounting again with the same config is a no-op;
    /// with a different config it behaves like `reconfigure`.
    pub fn mount(&mut self, config: C::Config) -> Result<()> {
        if self.active.is_some() {
            if self.config.as_ref() == Some(&config) {
                debug!(binding = self.label, "Already mounted with same config");
                return Ok(());
            }
            self.unmount();
        }
        self.launch(config)
    }

    /// Swap in a new config. A mounted binding stops its controller and starts a
    /// fresh one; an unmounted binding only records the config for the next mount.
    pub fn reconfigure(&mut self, config: C::Config) -> Result<()> {
        if self.config.as_ref() == Some(&config) {
            return Ok(());
        }
        if self.active.is_none() {
            self.config = Some(config);
            return Ok(());
        }
        info!(binding = self.label, "Reconfiguring");
        self.unmount();
        self.launch(config)
    }

    /// Mount again with the last recorded config, if any
    pub fn remount(&mut self) -> Result<()> {
        match self.config.clone() {
            Some(config) => self.mount(config),
            None => Ok(()),
        }
    }

    /// Deactivate. Idempotent.
    pub fn unmount(&mut self) {
        if let Some(mut controller) = self.active.take() {
            controller.stop();
            self.stops += 1;
            debug!(binding = self.label, generation = self.generation, "Unmounted");
        }
    }

    fn launch(&mut self, config: C::Config) -> Result<()> {
        self.generation += 1;
        let controller = C::launch(&config, self.generation)?;
        self.active = Some(controller);
        self.config = Some(config);
        self.starts += 1;
        debug!(binding = self.label, generation = self.generation, "Mounted");
        Ok(())
    }
}

impl<C: Controller> Drop for MountBinding<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}

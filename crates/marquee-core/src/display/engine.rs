//! L2 Organism Layer: One rotating-text display
//!
//! Bundles a text rotation binding, an optional caret binding and a
//! transition presenter behind a single configuration. Hosts call
//! `activate` when the display becomes visible, `deactivate` when it goes
//! away, and `output` once per frame.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::binding::{MountBinding, TextCadence};
use super::blink::CursorBlinkController;
use super::cycling::{CyclingTextController, TransitionToken};
use super::easing::EasingType;
use super::presenter::{PresentedFrame, TransitionPresenter, TransitionStyle};
use crate::{Error, Result};

/// Configuration for one display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub content: Vec<String>,
    pub text_interval_ms: u64,
    /// None disables the caret
    pub cursor_interval_ms: Option<u64>,
    pub transition_duration_ms: u64,
    #[serde(default)]
    pub style: TransitionStyle,
    #[serde(default)]
    pub easing: EasingType,
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.content.is_empty() {
            return Err(Error::InvalidConfig(
                "content sequence must contain at least one entry".to_string(),
            ));
        }
        if self.text_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "text interval must be greater than zero".to_string(),
            ));
        }
        if self.cursor_interval_ms == Some(0) {
            return Err(Error::InvalidConfig(
                "cursor interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    fn text_cadence(&self) -> TextCadence {
        TextCadence {
            content: self.content.clone(),
            interval_ms: self.text_interval_ms,
        }
    }

    fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }
}

/// What the host draws for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOutput {
    pub current_text: String,
    pub cursor_visible: bool,
    pub token: Option<TransitionToken>,
    pub frame: PresentedFrame,
}

pub struct DisplayEngine {
    config: DisplayConfig,
    text: MountBinding<CyclingTextController>,
    cursor: MountBinding<CursorBlinkController>,
    presenter: TransitionPresenter,
}

impl DisplayEngine {
    pub fn new(config: DisplayConfig) -> Result<Self> {
        config.validate()?;
        let presenter = TransitionPresenter::new(
            config.style,
            config.transition_duration(),
            config.easing,
        );
        Ok(Self {
            config,
            text: MountBinding::new("text"),
            cursor: MountBinding::new("cursor"),
            presenter,
        })
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.text.is_mounted()
    }

    pub fn has_cursor(&self) -> bool {
        self.config.cursor_interval_ms.is_some()
    }

    /// Start the text timer and, if configured, the caret timer
    pub fn activate(&mut self) -> Result<()> {
        if self.is_active() {
            return Ok(());
        }
        self.text.mount(self.config.text_cadence())?;
        if let Some(interval_ms) = self.config.cursor_interval_ms {
            if let Err(e) = self.cursor.mount(interval_ms) {
                self.text.unmount();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Stop both timers and forget what was on screen
    pub fn deactivate(&mut self) {
        self.text.unmount();
        self.cursor.unmount();
        self.presenter.clear();
    }

    /// Apply a new configuration, restarting only the timers whose
    /// parameters changed
    pub fn reconfigure(&mut self, config: DisplayConfig) -> Result<()> {
        config.validate()?;
        if config == self.config {
            return Ok(());
        }
        info!(entries = config.content.len(), "Display reconfigured");

        self.text.reconfigure(config.text_cadence())?;

        match config.cursor_interval_ms {
            Some(interval_ms) => {
                if self.is_active() && !self.cursor.is_mounted() {
                    self.cursor.mount(interval_ms)?;
                } else {
                    self.cursor.reconfigure(interval_ms)?;
                }
            }
            None => self.cursor.unmount(),
        }

        self.presenter
            .set_animation(config.style, config.transition_duration(), config.easing);
        self.config = config;
        Ok(())
    }

    /// Read the published state and produce the frame for `now`
    pub fn output(&mut self, now: Instant) -> DisplayOutput {
        if let Some(rotation) = self.text.controller().and_then(|c| c.current()) {
            self.presenter.present(rotation.value(), rotation.token(), now);
        }
        self.presenter.advance(now);

        let cursor_visible = self
            .cursor
            .controller()
            .map(|c| c.is_visible())
            .unwrap_or(false);

        DisplayOutput {
            current_text: self.presenter.current_text().unwrap_or_default().to_string(),
            cursor_visible,
            token: self.presenter.current_token(),
            frame: self.presenter.frame(now),
        }
    }

    /// Whether the next frame differs from a static one
    pub fn is_animating(&self) -> bool {
        self.presenter.is_animating()
    }

    pub fn text_binding(&self) -> &MountBinding<CyclingTextController> {
        &self.text
    }

    pub fn cursor_binding(&self) -> &MountBinding<CursorBlinkController> {
        &self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DisplayConfig {
        DisplayConfig {
            content: vec!["Frontend Development".into(), "Backend Development".into()],
            text_interval_ms: 2500,
            cursor_interval_ms: Some(500),
            transition_duration_ms: 500,
            style: TransitionStyle::SlideLeft,
            easing: EasingType::Cubic,
        }
    }

    #[test]
    fn test_validate() {
        assert!(config().validate().is_ok());

        let mut bad = config();
        bad.content.clear();
        assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));

        let mut bad = config();
        bad.text_interval_ms = 0;
        assert!(bad.validate().is_err());

        let mut bad = config();
        bad.cursor_interval_ms = Some(0);
        assert!(bad.validate().is_err());

        let mut no_cursor = config();
        no_cursor.cursor_interval_ms = None;
        assert!(no_cursor.validate().is_ok());
    }

    #[test]
    fn test_inactive_output_is_blank() {
        let mut engine = DisplayEngine::new(config()).unwrap();
        let output = engine.output(Instant::now());
        assert_eq!(output.current_text, "");
        assert!(!output.cursor_visible);
        assert!(output.token.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_activate_and_deactivate() {
        let mut engine = DisplayEngine::new(config()).unwrap();
        engine.activate().unwrap();
        engine.activate().unwrap();
        assert!(engine.is_active());
        assert_eq!(engine.text_binding().starts(), 1);
        assert_eq!(engine.cursor_binding().starts(), 1);

        let output = engine.output(Instant::now());
        assert_eq!(output.current_text, "Frontend Development");
        assert!(output.cursor_visible);

        engine.deactivate();
        assert!(!engine.is_active());
        assert_eq!(engine.text_binding().stops(), 1);
        assert_eq!(engine.cursor_binding().stops(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconfigure_restarts_only_changed_timer() {
        let mut engine = DisplayEngine::new(config()).unwrap();
        engine.activate().unwrap();

        let mut next = config();
        next.text_interval_ms = 4000;
        engine.reconfigure(next.clone()).unwrap();
        assert_eq!(engine.text_binding().starts(), 2);
        assert_eq!(engine.cursor_binding().starts(), 1);

        next.cursor_interval_ms = None;
        engine.reconfigure(next.clone()).unwrap();
        assert!(!engine.cursor_binding().is_mounted());

        next.cursor_interval_ms = Some(300);
        engine.reconfigure(next).unwrap();
        assert!(engine.cursor_binding().is_mounted());
        assert_eq!(engine.cursor_binding().config(), Some(&300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconfigure_changes_token_generation() {
        let mut engine = DisplayEngine::new(config()).unwrap();
        engine.activate().unwrap();
        let first = engine.output(Instant::now()).token.unwrap();

        let mut next = config();
        next.content = vec!["Mobile Development".into()];
        engine.reconfigure(next).unwrap();

        let output = engine.output(Instant::now());
        assert_ne!(output.token.unwrap().generation, first.generation);
        assert_eq!(output.current_text, "Mobile Development");
        let outgoing = output.frame.outgoing.unwrap();
        assert_eq!(outgoing.text, "Frontend Development");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_reconfigure_keeps_animation() {
        let mut engine = DisplayEngine::new(config()).unwrap();
        engine.activate().unwrap();

        let mut bad = config();
        bad.style = TransitionStyle::Fade;
        bad.content.clear();
        assert!(engine.reconfigure(bad).is_err());
        assert_eq!(engine.config().style, TransitionStyle::SlideLeft);

        let current = engine.output(Instant::now()).frame.current.unwrap();
        assert_eq!(current.phase, crate::display::SlotPhase::Entering);
        assert_eq!(current.pose.offset_x, 2.0);
    }

    #[test]
    fn test_new_rejects_invalid() {
        let mut bad = config();
        bad.content.clear();
        assert!(DisplayEngine::new(bad).is_err());
    }
}

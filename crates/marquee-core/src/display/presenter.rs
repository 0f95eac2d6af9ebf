//! L3 Molecular Layer: Enter/exit transitions between successive values
//!
//! The presenter keeps at most two slots: the current value (entering or
//! present) and one outgoing value (exiting). When the token changes, the
//! current slot becomes the outgoing slot and the new value enters. If an
//! outgoing slot is still exiting at that moment it is discarded on the spot:
//! the last token wins and exits are never queued.
//!
//! All methods take an explicit `now` so the presenter can be driven by any
//! clock.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cycling::TransitionToken;
use super::easing::EasingType;
use super::timing::{is_complete, lerp, progress};

/// Visual shape of the enter/exit pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionStyle {
    /// Enter from below, exit upward, scaling from/to 0.8
    #[default]
    SlideUp,
    /// Enter from the right, exit to the left, scaling from/to 0.8
    SlideLeft,
    /// Opacity only
    Fade,
}

/// Animated properties of one slot. Offsets are in terminal cells
/// (columns for `offset_x`, rows for `offset_y`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub opacity: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Pose {
    pub const REST: Pose = Pose {
        opacity: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    fn lerp(from: Pose, to: Pose, t: f64) -> Pose {
        Pose {
            opacity: lerp(from.opacity, to.opacity, t),
            offset_x: lerp(from.offset_x, to.offset_x, t),
            offset_y: lerp(from.offset_y, to.offset_y, t),
            scale: lerp(from.scale, to.scale, t),
        }
    }
}

impl TransitionStyle {
    fn enter_from(&self) -> Pose {
        match self {
            TransitionStyle::SlideUp => Pose {
                opacity: 0.0,
                offset_x: 0.0,
                offset_y: 1.0,
                scale: 0.8,
            },
            TransitionStyle::SlideLeft => Pose {
                opacity: 0.0,
                offset_x: 2.0,
                offset_y: 0.0,
                scale: 0.8,
            },
            TransitionStyle::Fade => Pose {
                opacity: 0.0,
                ..Pose::REST
            },
        }
    }

    fn exit_to(&self) -> Pose {
        let from = self.enter_from();
        Pose {
            offset_x: -from.offset_x,
            offset_y: -from.offset_y,
            ..from
        }
    }
}

/// Per-slot phase. A slot that does not exist is "absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    Entering,
    Present,
    Exiting,
}

#[derive(Debug, Clone)]
struct Slot {
    text: String,
    token: TransitionToken,
    phase: SlotPhase,
    since: Instant,
}

/// A slot as it should be drawn at a given instant
#[derive(Debug, Clone, PartialEq)]
pub struct SlotFrame {
    pub text: String,
    pub token: TransitionToken,
    pub phase: SlotPhase,
    /// Eased progress of the current phase, 1.0 when present
    pub progress: f64,
    pub pose: Pose,
}

/// Everything to draw at one instant
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PresentedFrame {
    pub current: Option<SlotFrame>,
    pub outgoing: Option<SlotFrame>,
}

#[derive(Debug, Clone)]
pub struct TransitionPresenter {
    style: TransitionStyle,
    duration: Duration,
    easing: EasingType,
    current: Option<Slot>,
    outgoing: Option<Slot>,
    cancelled_exits: u64,
    completed_exits: u64,
}

impl TransitionPresenter {
    pub fn new(style: TransitionStyle, duration: Duration, easing: EasingType) -> Self {
        Self {
            style,
            duration,
            easing,
            current: None,
            outgoing: None,
            cancelled_exits: 0,
            completed_exits: 0,
        }
    }

    /// Change the animation shape. Slots already in flight keep their start time.
    pub fn set_animation(&mut self, style: TransitionStyle, duration: Duration, easing: EasingType) {
        self.style = style;
        self.duration = duration;
        self.easing = easing;
    }

    /// Show `value` keyed by `token`. Returns true if a transition started.
    pub fn present(&mut self, value: &str, token: TransitionToken, now: Instant) -> bool {
        self.advance(now);

        if self.current.as_ref().is_some_and(|slot| slot.token == token) {
            return false;
        }

        if let Some(stale) = self.outgoing.take() {
            self.cancelled_exits += 1;
            debug!(text = %stale.text, "Exit transition cancelled by newer value");
        }

        if let Some(mut previous) = self.current.take() {
            previous.phase = SlotPhase::Exiting;
            previous.since = now;
            self.outgoing = Some(previous);
        }

        self.current = Some(Slot {
            text: value.to_string(),
            token,
            phase: SlotPhase::Entering,
            since: now,
        });
        true
    }

    /// Settle finished phases: entering becomes present, finished exits are dropped
    pub fn advance(&mut self, now: Instant) {
        if let Some(slot) = self.current.as_mut() {
            if slot.phase == SlotPhase::Entering && is_complete(slot.since, self.duration, now) {
                slot.phase = SlotPhase::Present;
                slot.since = now;
            }
        }
        if self
            .outgoing
            .as_ref()
            .is_some_and(|slot| is_complete(slot.since, self.duration, now))
        {
            self.outgoing = None;
            self.completed_exits += 1;
        }
    }

    /// Snapshot of both slots at `now`. Does not change phase bookkeeping.
    pub fn frame(&self, now: Instant) -> PresentedFrame {
        PresentedFrame {
            current: self.current.as_ref().map(|slot| self.slot_frame(slot, now)),
            outgoing: self.outgoing.as_ref().map(|slot| self.slot_frame(slot, now)),
        }
    }

    fn slot_frame(&self, slot: &Slot, now: Instant) -> SlotFrame {
        let (progress, pose) = match slot.phase {
            SlotPhase::Present => (1.0, Pose::REST),
            SlotPhase::Entering => {
                let t = self.easing.apply(progress(slot.since, self.duration, now));
                (t, Pose::lerp(self.style.enter_from(), Pose::REST, t))
            }
            SlotPhase::Exiting => {
                let t = self.easing.apply(progress(slot.since, self.duration, now));
                (t, Pose::lerp(Pose::REST, self.style.exit_to(), t))
            }
        };
        SlotFrame {
            text: slot.text.clone(),
            token: slot.token,
            phase: slot.phase,
            progress,
            pose,
        }
    }

    pub fn current_text(&self) -> Option<&str> {
        self.current.as_ref().map(|slot| slot.text.as_str())
    }

    pub fn current_token(&self) -> Option<TransitionToken> {
        self.current.as_ref().map(|slot| slot.token)
    }

    /// Whether any slot is mid-animation
    pub fn is_animating(&self) -> bool {
        self.outgoing.is_some()
            || self
                .current
                .as_ref()
                .is_some_and(|slot| slot.phase == SlotPhase::Entering)
    }

    /// Exits discarded because a newer value arrived first
    pub fn cancelled_exits(&self) -> u64 {
        self.cancelled_exits
    }

    /// Exits that ran to completion
    pub fn completed_exits(&self) -> u64 {
        self.completed_exits
    }

    /// Return to the absent state, dropping both slots
    pub fn clear(&mut self) {
        self.current = None;
        self.outgoing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(step: u64) -> TransitionToken {
        TransitionToken { generation: 1, step }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn presenter() -> TransitionPresenter {
        TransitionPresenter::new(TransitionStyle::SlideUp, ms(500), EasingType::Linear)
    }

    #[test]
    fn test_first_value_enters() {
        let t0 = Instant::now();
        let mut p = presenter();
        assert!(p.present("Frontend", token(0), t0));

        let frame = p.frame(t0);
        let current = frame.current.unwrap();
        assert_eq!(current.phase, SlotPhase::Entering);
        assert_eq!(current.pose.opacity, 0.0);
        assert_eq!(current.pose.offset_y, 1.0);
        assert!(frame.outgoing.is_none());
    }

    #[test]
    fn test_same_token_is_ignored() {
        let t0 = Instant::now();
        let mut p = presenter();
        p.present("a", token(0), t0);
        assert!(!p.present("a", token(0), t0 + ms(100)));
        assert!(p.frame(t0 + ms(100)).outgoing.is_none());
    }

    #[test]
    fn test_enter_settles_to_present() {
        let t0 = Instant::now();
        let mut p = presenter();
        p.present("a", token(0), t0);

        let mid = p.frame(t0 + ms(250)).current.unwrap();
        assert!((mid.pose.opacity - 0.5).abs() < 0.001);
        assert!((mid.pose.scale - 0.9).abs() < 0.001);

        p.advance(t0 + ms(500));
        let done = p.frame(t0 + ms(500)).current.unwrap();
        assert_eq!(done.phase, SlotPhase::Present);
        assert_eq!(done.pose, Pose::REST);
        assert!(!p.is_animating());
    }

    #[test]
    fn test_outgoing_retained_during_exit() {
        let t0 = Instant::now();
        let mut p = presenter();
        p.present("a", token(0), t0);
        p.present("b", token(1), t0 + ms(1000));

        let frame = p.frame(t0 + ms(1250));
        let outgoing = frame.outgoing.unwrap();
        assert_eq!(outgoing.text, "a");
        assert_eq!(outgoing.phase, SlotPhase::Exiting);
        assert!(outgoing.pose.offset_y < 0.0);
        assert_eq!(frame.current.unwrap().text, "b");

        p.advance(t0 + ms(1500));
        assert!(p.frame(t0 + ms(1500)).outgoing.is_none());
        assert_eq!(p.completed_exits(), 1);
        assert_eq!(p.cancelled_exits(), 0);
    }

    #[test]
    fn test_rapid_tokens_cancel_pending_exit() {
        let t0 = Instant::now();
        let mut p = presenter();
        p.present("a", token(0), t0);
        p.present("b", token(1), t0 + ms(100));
        p.present("c", token(2), t0 + ms(200));

        let frame = p.frame(t0 + ms(200));
        assert_eq!(frame.current.as_ref().unwrap().text, "c");
        assert_eq!(frame.outgoing.as_ref().unwrap().text, "b");
        assert_eq!(p.cancelled_exits(), 1);
        assert_eq!(p.completed_exits(), 0);

        // "a" never comes back and nothing is queued behind "b"
        p.advance(t0 + ms(700));
        let frame = p.frame(t0 + ms(700));
        assert!(frame.outgoing.is_none());
        assert_eq!(frame.current.unwrap().phase, SlotPhase::Present);
        assert_eq!(p.completed_exits(), 1);
    }

    #[test]
    fn test_slide_left_and_fade_poses() {
        let t0 = Instant::now();
        let mut p = TransitionPresenter::new(TransitionStyle::SlideLeft, ms(100), EasingType::Linear);
        p.present("a", token(0), t0);
        p.present("b", token(1), t0 + ms(200));
        let frame = p.frame(t0 + ms(300));
        assert_eq!(frame.outgoing.unwrap().pose.offset_x, -2.0);

        let mut p = TransitionPresenter::new(TransitionStyle::Fade, ms(100), EasingType::Linear);
        p.present("a", token(0), t0);
        let pose = p.frame(t0).current.unwrap().pose;
        assert_eq!((pose.offset_x, pose.offset_y, pose.scale), (0.0, 0.0, 1.0));
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let t0 = Instant::now();
        let mut p = TransitionPresenter::new(TransitionStyle::SlideUp, Duration::ZERO, EasingType::Cubic);
        p.present("a", token(0), t0);
        p.present("b", token(1), t0);
        p.advance(t0);
        let frame = p.frame(t0);
        assert!(frame.outgoing.is_none());
        assert_eq!(frame.current.unwrap().pose, Pose::REST);
    }

    #[test]
    fn test_clear() {
        let t0 = Instant::now();
        let mut p = presenter();
        p.present("a", token(0), t0);
        p.clear();
        assert!(p.current_text().is_none());
        assert_eq!(p.frame(t0), PresentedFrame::default());
    }
}

//! Cycling-content display engine
//!
//! Rotating text with a blinking caret and enter/exit transitions, driven by
//! owned tokio timers whose lifetimes are tied to the hosting view.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing curves
//! - `timing` - Progress and interpolation helpers
//! - `sequence` - Non-empty immutable content list
//! - `timer` - Owned cancellable periodic timer
//! - `lifecycle` - `Idle -> Running -> Stopped` controller states
//!
//! ## L3 Molecular Layer
//! - `cycling` - Text rotation controller
//! - `blink` - Caret blink controller
//! - `presenter` - Enter/exit transition slots
//!
//! ## L2 Organism Layer
//! - `binding` - Start/stop pairing on mount, unmount and reconfigure
//! - `engine` - One complete display
//!
//! # Usage
//!
//! ```ignore
//! use marquee_core::display::{DisplayConfig, DisplayEngine};
//!
//! let mut engine = DisplayEngine::new(config)?;
//! engine.activate()?;
//!
//! // Once per frame
//! let output = engine.output(std::time::Instant::now());
//!
//! // When the view goes away (also happens on drop)
//! engine.deactivate();
//! ```

// L4 Atomic Layer
pub mod easing;
pub mod lifecycle;
pub mod sequence;
pub mod timer;
pub mod timing;

// L3 Molecular Layer
pub mod blink;
pub mod cycling;
pub mod presenter;

// L2 Organism Layer
pub mod binding;
pub mod engine;

pub use binding::{Controller, MountBinding, TextCadence};
pub use blink::CursorBlinkController;
pub use cycling::{CyclingTextController, Rotation, TransitionToken};
pub use easing::EasingType;
pub use engine::{DisplayConfig, DisplayEngine, DisplayOutput};
pub use lifecycle::Lifecycle;
pub use presenter::{
    Pose, PresentedFrame, SlotFrame, SlotPhase, TransitionPresenter, TransitionStyle,
};
pub use sequence::ContentSequence;
pub use timer::PeriodicTimer;

pub mod config;
pub mod display;
pub mod error;

pub use config::{AppConfig, SectionConfig};
pub use display::{DisplayConfig, DisplayEngine, DisplayOutput, EasingType, TransitionStyle};
pub use error::{Error, Result};

//! L4 Atomic Layer: Pure easing curves for enter/exit transitions
//!
//! Maps transition progress in [0, 1] to eased progress in [0, 1].

use serde::{Deserialize, Serialize};

/// Easing curve applied to transition progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Jump straight to the end state
    None,
    Linear,
    /// 1 - (1-t)^3, the default "ease out"
    #[default]
    Cubic,
    Quintic,
    /// 1 - 2^(-10t)
    EaseOut,
}

impl EasingType {
    /// Apply the easing curve to a progress value
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            EasingType::Quintic => {
                let inv = 1.0 - t;
                1.0 - inv.powi(5)
            }
            EasingType::EaseOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * t)
                }
            }
        }
    }
}

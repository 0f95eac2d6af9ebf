use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub muted: Color,

    // Semantic colors
    pub accent: Color,
    pub border: Color,
    pub error: Color,
    pub cursor: Color,

    // Rotating text gradient (left to right)
    pub gradient_start: Color,
    pub gradient_mid: Color,
    pub gradient_end: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Purple / pink / cyan on near-black
        Self {
            bg0: Color::Rgb(0x0a, 0x0a, 0x0a),
            bg1: Color::Rgb(0x1e, 0x1b, 0x2e),
            fg0: Color::Rgb(0xf5, 0xf5, 0xf5),
            fg1: Color::Rgb(0xd1, 0xd5, 0xdb),
            muted: Color::Rgb(0x9c, 0xa3, 0xaf),
            accent: Color::Rgb(0xc0, 0x84, 0xfc),
            border: Color::Rgb(0x6b, 0x21, 0xa8),
            error: Color::Rgb(0xf8, 0x71, 0x71),
            cursor: Color::Rgb(0xc0, 0x84, 0xfc),
            gradient_start: Color::Rgb(0xc0, 0x84, 0xfc),
            gradient_mid: Color::Rgb(0xf4, 0x72, 0xb6),
            gradient_end: Color::Rgb(0x22, 0xd3, 0xee),
        }
    }
}

impl Theme {
    /// Color at position `t` in [0, 1] along the rotating text gradient
    pub fn gradient_at(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        if t < 0.5 {
            mix(self.gradient_start, self.gradient_mid, t * 2.0)
        } else {
            mix(self.gradient_mid, self.gradient_end, (t - 0.5) * 2.0)
        }
    }

    /// Fade `color` toward the page background; `alpha` 1.0 leaves it unchanged
    pub fn fade(&self, color: Color, alpha: f64) -> Color {
        if alpha >= 1.0 {
            return color;
        }
        if alpha <= 0.0 {
            return self.bg0;
        }
        match (color, self.bg0) {
            (Color::Rgb(..), Color::Rgb(..)) => mix(self.bg0, color, alpha),
            _ => {
                if alpha > 0.5 {
                    color
                } else {
                    self.bg0
                }
            }
        }
    }
}

/// Interpolate between two RGB colors; non-RGB colors snap at the midpoint
pub fn mix(from: Color, to: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            Color::Rgb(channel(r1, r2), channel(g1, g2), channel(b1, b2))
        }
        _ => {
            if t < 0.5 {
                from
            } else {
                to
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_endpoints() {
        let a = Color::Rgb(0, 0, 0);
        let b = Color::Rgb(200, 100, 50);
        assert_eq!(mix(a, b, 0.0), a);
        assert_eq!(mix(a, b, 1.0), b);
        assert_eq!(mix(a, b, 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(mix(a, b, 7.0), b);
    }

    #[test]
    fn test_fade_to_background() {
        let theme = Theme::default();
        assert_eq!(theme.fade(theme.accent, 1.0), theme.accent);
        assert_eq!(theme.fade(theme.accent, 0.0), theme.bg0);
        assert_eq!(theme.fade(Color::Red, 0.2), theme.bg0);
        assert_eq!(theme.fade(Color::Red, 0.8), Color::Red);
    }

    #[test]
    fn test_gradient_stops() {
        let theme = Theme::default();
        assert_eq!(theme.gradient_at(0.0), theme.gradient_start);
        assert_eq!(theme.gradient_at(0.5), theme.gradient_mid);
        assert_eq!(theme.gradient_at(1.0), theme.gradient_end);
    }
}

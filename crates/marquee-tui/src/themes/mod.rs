//! Theme registry and loader
//!
//! A handful of built-in palettes with hex color overrides from config.

mod dracula;
mod monokai;
mod nord;
mod one_dark;

use marquee_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;
use tracing::warn;

use crate::theme::Theme;

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load a theme by name from config
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "synthwave" => Theme::default(),
        "dracula" => dracula::default(),
        "nord" => nord::default(),
        "one-dark" | "onedark" => one_dark::default(),
        "monokai" => monokai::default(),
        other => {
            warn!(theme = other, "Unknown theme, using synthwave");
            Theme::default()
        }
    };

    apply_overrides(base, &config.colors)
}

fn apply_color(slot: &mut Color, hex: &Option<String>) {
    if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
        *slot = color;
    }
}

/// Apply user color overrides to a base theme
fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    apply_color(&mut theme.bg0, &overrides.background);
    apply_color(&mut theme.fg0, &overrides.foreground);
    apply_color(&mut theme.muted, &overrides.muted);
    apply_color(&mut theme.accent, &overrides.accent);
    apply_color(&mut theme.gradient_start, &overrides.gradient_start);
    apply_color(&mut theme.gradient_end, &overrides.gradient_end);
    apply_color(&mut theme.cursor, &overrides.cursor);
    theme
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["synthwave", "dracula", "nord", "one-dark", "monokai"]
}

//! Nord theme
//! https://www.nordtheme.com/

use ratatui::style::Color;
use crate::theme::Theme;

/// Nord default theme
pub fn default() -> Theme {
    Theme {
        // Polar Night
        bg0: Color::Rgb(0x2e, 0x34, 0x40), // nord0
        bg1: Color::Rgb(0x3b, 0x42, 0x52), // nord1
        // Snow Storm
        fg0: Color::Rgb(0xec, 0xef, 0xf4), // nord6
        fg1: Color::Rgb(0xd8, 0xde, 0xe9), // nord4
        muted: Color::Rgb(0x61, 0x6e, 0x88),
        accent: Color::Rgb(0x88, 0xc0, 0xd0), // nord8
        border: Color::Rgb(0x4c, 0x56, 0x6a), // nord3
        error: Color::Rgb(0xbf, 0x61, 0x6a),  // nord11
        cursor: Color::Rgb(0x88, 0xc0, 0xd0),
        // Frost into Aurora
        gradient_start: Color::Rgb(0x81, 0xa1, 0xc1), // nord9
        gradient_mid: Color::Rgb(0xb4, 0x8e, 0xad),   // nord15
        gradient_end: Color::Rgb(0x8f, 0xbc, 0xbb),   // nord7
    }
}

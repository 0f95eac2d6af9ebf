//! Monokai theme

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x27, 0x28, 0x22), // background
        bg1: Color::Rgb(0x3e, 0x3d, 0x32), // selection
        fg0: Color::Rgb(0xf8, 0xf8, 0xf2), // foreground
        fg1: Color::Rgb(0xd0, 0xd0, 0xc0),
        muted: Color::Rgb(0x75, 0x71, 0x5e), // comment
        accent: Color::Rgb(0xa6, 0xe2, 0x2e), // green
        border: Color::Rgb(0x49, 0x48, 0x3e),
        error: Color::Rgb(0xf9, 0x26, 0x72),
        cursor: Color::Rgb(0xe6, 0xdb, 0x74),
        gradient_start: Color::Rgb(0xf9, 0x26, 0x72), // magenta
        gradient_mid: Color::Rgb(0xfd, 0x97, 0x1f),   // orange
        gradient_end: Color::Rgb(0x66, 0xd9, 0xef),   // cyan
    }
}

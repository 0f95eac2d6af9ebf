//! One Dark theme (Atom)

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2c, 0x34), // bg
        bg1: Color::Rgb(0x21, 0x25, 0x2b), // bg-darker
        fg0: Color::Rgb(0xab, 0xb2, 0xbf), // fg
        fg1: Color::Rgb(0x9d, 0xa5, 0xb4), // fg-dim
        muted: Color::Rgb(0x5c, 0x63, 0x70), // comment
        accent: Color::Rgb(0xc6, 0x78, 0xdd), // purple
        border: Color::Rgb(0x4b, 0x52, 0x63), // gutter
        error: Color::Rgb(0xe0, 0x6c, 0x75),
        cursor: Color::Rgb(0x61, 0xaf, 0xef),
        gradient_start: Color::Rgb(0xc6, 0x78, 0xdd), // purple
        gradient_mid: Color::Rgb(0xe0, 0x6c, 0x75),   // red
        gradient_end: Color::Rgb(0x56, 0xb6, 0xc2),   // cyan
    }
}

//! Rotating text with a blinking caret
//!
//! Draws the current and outgoing slots of a [`DisplayOutput`] into one line.
//! Each slot's pose maps onto the terminal grid:
//!
//! - `offset_y` moves the slot by whole rows
//! - `offset_x` moves the slot by whole columns
//! - `opacity` blends every glyph toward the page background
//! - `scale` below 1 trims characters from both ends

use marquee_core::display::{DisplayOutput, Pose, SlotFrame};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthChar;

use crate::theme::Theme;

pub const CARET: char = '|';

pub struct RotatingText<'a> {
    output: &'a DisplayOutput,
    theme: &'a Theme,
}

impl<'a> RotatingText<'a> {
    pub fn new(output: &'a DisplayOutput, theme: &'a Theme) -> Self {
        Self { output, theme }
    }

    /// Baseline row: the vertical middle of the area
    fn baseline(area: Rect) -> i32 {
        area.y as i32 + (area.height.saturating_sub(1) / 2) as i32
    }

    /// Left column that centres text of `width` cells (caret cell included)
    fn origin(area: Rect, width: usize) -> i32 {
        let slack = (area.width as usize).saturating_sub(width);
        area.x as i32 + (slack / 2) as i32
    }

    fn render_slot(&self, slot: &SlotFrame, area: Rect, buf: &mut Buffer) {
        let chars: Vec<char> = slot.text.chars().collect();
        let full_width = text_width(&chars) + 1;
        let visible = scaled_range(chars.len(), slot.pose.scale);

        let row = Self::baseline(area) + slot.pose.offset_y.round() as i32;
        let mut x = Self::origin(area, full_width) + slot.pose.offset_x.round() as i32;

        // Trimmed glyphs still occupy their cells so the text shrinks toward its centre
        x += text_width(&chars[..visible.start]) as i32;

        let last = chars.len().saturating_sub(1).max(1) as f64;
        for (i, ch) in chars.iter().enumerate().take(visible.end).skip(visible.start) {
            let color = self.theme.gradient_at(i as f64 / last);
            let style = self.glyph_style(color, &slot.pose);
            put_char(buf, area, x, row, *ch, style);
            x += ch.width().unwrap_or(0) as i32;
        }
    }

    fn glyph_style(&self, color: ratatui::style::Color, pose: &Pose) -> Style {
        Style::default()
            .fg(self.theme.fade(color, pose.opacity))
            .add_modifier(Modifier::BOLD)
    }
}

impl Widget for RotatingText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Outgoing first so the incoming slot wins overlapping cells
        if let Some(outgoing) = &self.output.frame.outgoing {
            self.render_slot(outgoing, area, buf);
        }

        // The caret stays at the resting end of the current text
        let width = match &self.output.frame.current {
            Some(current) => {
                self.render_slot(current, area, buf);
                text_width_str(&current.text)
            }
            None => 0,
        };

        if self.output.cursor_visible {
            let x = Self::origin(area, width + 1) + width as i32;
            let style = Style::default().fg(self.theme.cursor);
            put_char(buf, area, x, Self::baseline(area), CARET, style);
        }
    }
}

/// Index range of the characters still shown at `scale`
pub fn scaled_range(len: usize, scale: f64) -> std::ops::Range<usize> {
    if scale >= 1.0 || len == 0 {
        return 0..len;
    }
    let keep = ((len as f64) * scale.max(0.0) - 1e-9).ceil().max(0.0) as usize;
    let trim = len - keep.min(len);
    let head = trim / 2;
    head..(len - (trim - head))
}

fn text_width(chars: &[char]) -> usize {
    chars.iter().map(|c| c.width().unwrap_or(0)).sum()
}

fn text_width_str(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

fn in_rows(area: Rect, row: i32) -> bool {
    row >= area.top() as i32 && row < area.bottom() as i32
}

fn put_char(buf: &mut Buffer, area: Rect, x: i32, y: i32, ch: char, style: Style) {
    let width = ch.width().unwrap_or(0) as i32;
    if width == 0 || !in_rows(area, y) {
        return;
    }
    if x < area.left() as i32 || x + width > area.right() as i32 {
        return;
    }
    buf.set_string(x as u16, y as u16, ch.to_string(), style);
}

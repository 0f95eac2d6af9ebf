use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, SectionView};
use crate::widgets::RotatingText;

/// Rows reserved for the rotating line so one-row slides stay visible
const ROTATING_HEIGHT: u16 = 3;

pub struct SectionWidget;

impl SectionWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg0)), area);

        let Some(view) = app.current_section() else {
            return;
        };

        let body_height = body_height(view, area.width);
        let label_height = u16::from(!view.config.label.is_empty());
        let [_, heading, _, label, rotating, _, body, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(label_height),
            Constraint::Length(ROTATING_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(body_height),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(view.config.heading.as_str()))
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD)),
            heading,
        );

        if label_height > 0 {
            frame.render_widget(
                Paragraph::new(Line::from(view.config.label.as_str()))
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(theme.muted)),
                label,
            );
        }

        match (&view.error, &app.output) {
            (Some(error), _) if view.engine.is_none() || !view.is_active() => {
                frame.render_widget(
                    Paragraph::new(Line::from(format!("display unavailable: {}", error)))
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(theme.error)),
                    Rect { height: 1, y: rotating.y + rotating.height / 2, ..rotating },
                );
            }
            (_, Some(output)) => {
                frame.render_widget(RotatingText::new(output, theme), rotating);
            }
            _ => {}
        }

        let lines: Vec<Line> = view
            .config
            .body
            .iter()
            .map(|text| Line::from(text.as_str()))
            .collect();
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(theme.fg1)),
            body,
        );
    }
}

/// Rows needed by the body once wrapped to `width`
fn body_height(view: &SectionView, width: u16) -> u16 {
    let width = width.max(1) as usize;
    let rows: usize = view
        .config
        .body
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    use marquee_core::{AppConfig, SectionConfig};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use crate::theme::Theme;

    fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| SectionWidget::render(frame, frame.area(), app))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn test_renders_heading_and_rotating_text() {
        let mut config = AppConfig::default();
        config.ui.splash_duration_ms = 0;
        let mut app = App::new(Arc::new(config), Theme::default(), Instant::now());
        app.select_section(1);
        app.update(Instant::now());

        let text = screen(&draw(&app, 100, 20));
        assert!(text.contains("About Me"));
        assert!(text.contains("Currently Specializing In:"));
        // Entering slot starts trimmed and faded but still draws its middle
        assert!(text.contains("Developme") || text.contains("Frontend"));
    }

    #[tokio::test]
    async fn test_invalid_section_shows_placeholder() {
        let mut config = AppConfig::default();
        config.ui.splash_duration_ms = 0;
        config.sections[0].text_interval_ms = Some(0);
        let mut app = App::new(Arc::new(config), Theme::default(), Instant::now());
        app.update(Instant::now());

        let text = screen(&draw(&app, 100, 20));
        assert!(text.contains("display unavailable"));
        assert!(text.contains("Hi, I'm Sarah"));
    }

    #[test]
    fn test_body_height_wraps() {
        let config = AppConfig::default();
        let view = SectionView {
            config: config.sections[0].clone(),
            engine: None,
            error: None,
        };
        let len = config.sections[0].body[0].len() as u16;
        assert_eq!(body_height(&view, len), 1);
        assert_eq!(body_height(&view, len - 1), 2);

        let view = SectionView {
            config: SectionConfig {
                body: vec!["x".repeat(40_000), "y".repeat(40_000)],
                ..config.sections[0].clone()
            },
            engine: None,
            error: None,
        };
        assert_eq!(body_height(&view, 1), u16::MAX);
    }
}

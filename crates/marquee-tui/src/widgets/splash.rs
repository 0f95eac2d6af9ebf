use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Gauge, Paragraph},
    Frame,
};

use crate::app::{App, Splash};

pub struct SplashWidget;

impl SplashWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, splash: &Splash, now: Instant) {
        let theme = &app.theme;
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg0)), area);

        let [_, title, subtitle, _, bar, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from("Welcome"))
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
            title,
        );
        frame.render_widget(
            Paragraph::new(Line::from("Loading Portfolio..."))
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.muted)),
            subtitle,
        );

        let [bar] = Layout::horizontal([Constraint::Length(32)])
            .flex(Flex::Center)
            .areas(bar);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.gradient_at(splash.progress(now))).bg(theme.bg1))
            .ratio(splash.progress(now))
            .label("");
        frame.render_widget(gauge, bar);
    }
}

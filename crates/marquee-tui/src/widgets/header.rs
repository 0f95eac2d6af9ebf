use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::app::App;

pub struct HeaderWidget;

impl HeaderWidget {
    /// Navigation tabs, one per section
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let titles: Vec<Line> = app
            .sections
            .iter()
            .enumerate()
            .map(|(i, view)| Line::from(format!(" {}│{} ", i + 1, view.config.title)))
            .collect();

        let tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(theme.border))
                    .style(Style::default().bg(theme.bg0)),
            )
            .select(app.active)
            .style(Style::default().fg(theme.muted))
            .highlight_style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("·");

        frame.render_widget(tabs, area);
    }
}

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub const HELP_HINT: &str = " q:quit h/l:sections 1-9:jump r:reload ";

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            Self::summary(app)
        };

        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + HELP_HINT.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg1)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg1)),
            Span::styled(HELP_HINT, Style::default().fg(theme.muted).bg(theme.bg1)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Section position and the cadences driving it
    fn summary(app: &App) -> String {
        let Some(view) = app.current_section() else {
            return " no sections".to_string();
        };
        let position = format!(" {} | {}/{}", view.config.title, app.active + 1, app.sections.len());
        match &view.engine {
            Some(engine) => {
                let config = engine.config();
                let cursor = config
                    .cursor_interval_ms
                    .map(|ms| format!("{}ms", ms))
                    .unwrap_or_else(|| "off".to_string());
                format!(
                    "{} | text {}ms | caret {}",
                    position, config.text_interval_ms, cursor
                )
            }
            None => format!("{} | display off", position),
        }
    }
}

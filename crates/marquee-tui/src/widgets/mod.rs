mod header;
mod rotating_text;
mod section;
mod splash;
mod status_bar;

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

pub use header::HeaderWidget;
pub use rotating_text::{scaled_range, RotatingText, CARET};
pub use section::SectionWidget;
pub use splash::SplashWidget;
pub use status_bar::StatusBarWidget;

use crate::app::App;

/// Draw the whole screen for the current app state
pub fn render_app(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();

    if let Some(splash) = &app.splash {
        SplashWidget::render(frame, area, app, splash, now);
        return;
    }

    // Main layout: tabs + section + status bar
    let [header, body, status] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    HeaderWidget::render(frame, header, app);
    SectionWidget::render(frame, body, app);
    StatusBarWidget::render(frame, status, app);
}

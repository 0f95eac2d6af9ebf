use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use marquee_core::AppConfig;
use marquee_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{apply_action, handle_key_event, Action},
    load_theme,
    widgets::render_app,
};

pub async fn run(config: Arc<AppConfig>, config_path: PathBuf) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("marquee"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config, &config_path);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Arc<AppConfig>,
    config_path: &Path,
) -> Result<()> {
    let theme = load_theme(&config.ui.theme);
    let event_handler = EventHandler::new(config.ui.tick_rate_ms);
    let mut app = App::new(config, theme, Instant::now());
    info!(sections = app.sections.len(), "Showcase started");

    loop {
        let now = Instant::now();
        app.update(now);
        terminal.draw(|frame| render_app(frame, &app, now))?;

        if let Some(event) = event_handler.next()? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app);
                    if action != Action::None {
                        app.clear_status();
                    }
                    if !apply_action(&mut app, action) {
                        reload(&mut app, config_path);
                    }
                }
                // Next draw picks up the new size
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("Showcase closed");
    Ok(())
}

/// Invalid sections are not fatal here: they render as placeholders
fn reload(app: &mut App, config_path: &Path) {
    match AppConfig::load_from(config_path) {
        Ok(config) => app.reload(config),
        Err(e) => {
            warn!(error = %e, "Reload failed");
            app.set_status(format!("Reload failed: {}", e));
        }
    }
}

use std::sync::Arc;
use std::time::{Duration, Instant};

use marquee_core::display::{timing, DisplayEngine, DisplayOutput};
use marquee_core::{AppConfig, SectionConfig};
use tracing::{debug, info, warn};

use crate::theme::Theme;
use crate::themes::load_theme;

/// One page of the showcase and the display engine it hosts
pub struct SectionView {
    pub config: SectionConfig,
    /// `None` when the section's display settings were rejected
    pub engine: Option<DisplayEngine>,
    /// Why the engine could not be built or started
    pub error: Option<String>,
}

impl SectionView {
    pub fn new(section: SectionConfig, app_config: &AppConfig) -> Self {
        match DisplayEngine::new(app_config.display_config(&section)) {
            Ok(engine) => Self {
                config: section,
                engine: Some(engine),
                error: None,
            },
            Err(e) => {
                warn!(section = %section.id, error = %e, "Section display disabled");
                Self {
                    config: section,
                    engine: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.engine.as_ref().is_some_and(|e| e.is_active())
    }

    fn activate(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match engine.activate() {
            Ok(()) => debug!(section = %self.config.id, "Section activated"),
            Err(e) => {
                warn!(section = %self.config.id, error = %e, "Failed to start section display");
                self.error = Some(e.to_string());
            }
        }
    }

    fn deactivate(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.deactivate();
        }
    }

    /// Take over a new configuration, keeping the engine when possible
    fn reload(&mut self, section: SectionConfig, app_config: &AppConfig) {
        let display = app_config.display_config(&section);
        let result = match self.engine.as_mut() {
            Some(engine) => engine.reconfigure(display),
            None => DisplayEngine::new(display).map(|engine| {
                self.engine = Some(engine);
            }),
        };
        self.config = section;
        match result {
            Ok(()) => self.error = None,
            Err(e) => {
                warn!(section = %self.config.id, error = %e, "Keeping previous display settings");
                self.error = Some(e.to_string());
            }
        }
    }
}

/// Splash screen shown before the first section
#[derive(Debug, Clone, Copy)]
pub struct Splash {
    pub started: Instant,
    pub duration: Duration,
}

impl Splash {
    pub fn progress(&self, now: Instant) -> f64 {
        timing::progress(self.started, self.duration, now)
    }

    pub fn is_done(&self, now: Instant) -> bool {
        timing::is_complete(self.started, self.duration, now)
    }
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Active color theme
    pub theme: Theme,
    /// One view per configured section
    pub sections: Vec<SectionView>,
    /// Index of the visible section
    pub active: usize,
    /// Splash screen, while it is showing
    pub splash: Option<Splash>,
    /// Frame for the visible section, refreshed by `update`
    pub output: Option<DisplayOutput>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme, now: Instant) -> Self {
        let sections = config
            .sections
            .iter()
            .cloned()
            .map(|section| SectionView::new(section, &config))
            .collect();

        let splash = (config.ui.splash_duration_ms > 0).then(|| Splash {
            started: now,
            duration: Duration::from_millis(config.ui.splash_duration_ms),
        });

        let mut app = Self {
            config,
            theme,
            sections,
            active: 0,
            splash,
            output: None,
            should_quit: false,
            status_message: None,
        };
        if app.splash.is_none() {
            app.activate_current();
        }
        app
    }

    pub fn current_section(&self) -> Option<&SectionView> {
        self.sections.get(self.active)
    }

    pub fn is_splash(&self) -> bool {
        self.splash.is_some()
    }

    /// Leave the splash screen and start the first section
    pub fn skip_splash(&mut self) {
        if self.splash.take().is_some() {
            self.activate_current();
        }
    }

    pub fn next_section(&mut self) {
        if self.sections.is_empty() {
            return;
        }
        self.select_section((self.active + 1) % self.sections.len());
    }

    pub fn prev_section(&mut self) {
        if self.sections.is_empty() {
            return;
        }
        let len = self.sections.len();
        self.select_section((self.active + len - 1) % len);
    }

    /// Switch the visible section; the previous one is unmounted first
    pub fn select_section(&mut self, index: usize) {
        if index >= self.sections.len() || index == self.active {
            return;
        }
        if let Some(view) = self.sections.get_mut(self.active) {
            view.deactivate();
        }
        self.active = index;
        self.output = None;
        if self.splash.is_none() {
            self.activate_current();
        }
    }

    fn activate_current(&mut self) {
        if let Some(view) = self.sections.get_mut(self.active) {
            view.activate();
        }
    }

    /// Advance the splash and sample the visible section for drawing
    pub fn update(&mut self, now: Instant) {
        if self.splash.is_some_and(|s| s.is_done(now)) {
            self.skip_splash();
        }
        if self.splash.is_some() {
            return;
        }
        self.output = self
            .sections
            .get_mut(self.active)
            .and_then(|view| view.engine.as_mut())
            .filter(|engine| engine.is_active())
            .map(|engine| engine.output(now));
    }

    /// Apply a freshly loaded configuration
    ///
    /// Sections are matched by id; engines whose display settings did not
    /// change keep running untouched.
    pub fn reload(&mut self, config: AppConfig) {
        let visible_id = self.current_section().map(|v| v.config.id.clone());
        let mut previous: Vec<SectionView> = std::mem::take(&mut self.sections);

        let sections: Vec<SectionView> = config
            .sections
            .iter()
            .cloned()
            .map(|section| {
                match previous.iter().position(|v| v.config.id == section.id) {
                    Some(pos) => {
                        let mut view = previous.swap_remove(pos);
                        view.reload(section, &config);
                        view
                    }
                    None => SectionView::new(section, &config),
                }
            })
            .collect();
        // Sections that disappeared unmount as they drop
        drop(previous);

        self.theme = load_theme(&config.ui.theme);
        self.active = visible_id
            .and_then(|id| sections.iter().position(|v| v.config.id == id))
            .unwrap_or(0);
        self.sections = sections;
        self.config = Arc::new(config);
        self.output = None;

        if self.splash.is_none() {
            self.activate_current();
        }
        info!(sections = self.sections.len(), "Configuration reloaded");
        self.set_status("Configuration reloaded");
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(splash_ms: u64) -> AppConfig {
        let mut config = AppConfig::default();
        config.ui.splash_duration_ms = splash_ms;
        config
    }

    fn app(splash_ms: u64) -> App {
        App::new(Arc::new(config(splash_ms)), Theme::default(), Instant::now())
    }

    fn active_flags(app: &App) -> Vec<bool> {
        app.sections.iter().map(|v| v.is_active()).collect()
    }

    #[tokio::test]
    async fn test_starts_first_section_without_splash() {
        let mut app = app(0);
        assert!(!app.is_splash());
        assert_eq!(active_flags(&app), vec![true, false, false, false, false]);

        app.update(Instant::now());
        let output = app.output.as_ref().unwrap();
        assert_eq!(output.current_text, "Full Stack Developer");
        assert!(output.cursor_visible);
    }

    #[tokio::test]
    async fn test_splash_defers_mounting() {
        let start = Instant::now();
        let mut app = App::new(Arc::new(config(3000)), Theme::default(), start);
        assert_eq!(active_flags(&app), vec![false; 5]);

        app.update(start + Duration::from_millis(1000));
        assert!(app.is_splash());
        assert!(app.output.is_none());

        app.update(start + Duration::from_millis(3000));
        assert!(!app.is_splash());
        assert_eq!(active_flags(&app), vec![true, false, false, false, false]);
    }

    #[tokio::test]
    async fn test_skip_splash() {
        let mut app = app(3000);
        app.skip_splash();
        assert!(!app.is_splash());
        assert!(app.sections[0].is_active());
    }

    #[tokio::test]
    async fn test_switching_unmounts_previous_section() {
        let mut app = app(0);
        app.next_section();
        assert_eq!(app.active, 1);
        assert_eq!(active_flags(&app), vec![false, true, false, false, false]);

        let hero = app.sections[0].engine.as_ref().unwrap();
        assert_eq!(hero.text_binding().starts(), 1);
        assert_eq!(hero.text_binding().stops(), 1);

        app.prev_section();
        app.prev_section();
        assert_eq!(app.active, 4);
        assert_eq!(active_flags(&app), vec![false, false, false, false, true]);
    }

    #[tokio::test]
    async fn test_select_out_of_range_is_ignored() {
        let mut app = app(0);
        app.select_section(7);
        assert_eq!(app.active, 0);
        assert!(app.sections[0].is_active());
    }

    #[tokio::test]
    async fn test_invalid_section_shows_placeholder() {
        let mut config = config(0);
        config.sections[0].content.clear();
        let app = App::new(Arc::new(config), Theme::default(), Instant::now());
        let hero = app.current_section().unwrap();
        assert!(hero.engine.is_none());
        assert!(hero.error.is_some());
    }

    #[tokio::test]
    async fn test_reload_restarts_only_changed_sections() {
        let mut app = app(0);
        let mut updated = config(0);
        updated.sections[0].text_interval_ms = Some(1000);
        app.reload(updated.clone());

        let hero = app.sections[0].engine.as_ref().unwrap();
        assert!(hero.is_active());
        assert_eq!(hero.config().text_interval_ms, 1000);
        assert_eq!(hero.text_binding().starts(), 2);
        assert_eq!(hero.cursor_binding().starts(), 1);

        // Same config again changes nothing
        app.reload(updated);
        let hero = app.sections[0].engine.as_ref().unwrap();
        assert_eq!(hero.text_binding().starts(), 2);
        assert_eq!(app.status_message.as_deref(), Some("Configuration reloaded"));
    }

    #[tokio::test]
    async fn test_reload_keeps_visible_section_by_id() {
        let mut app = app(0);
        app.select_section(4);

        let mut updated = config(0);
        updated.sections.remove(0);
        app.reload(updated);

        assert_eq!(app.sections.len(), 4);
        assert_eq!(app.current_section().unwrap().config.id, "contact");
        assert!(app.current_section().unwrap().is_active());
    }
}

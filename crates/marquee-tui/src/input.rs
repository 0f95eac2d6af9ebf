use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextSection,
    PrevSection,
    /// Jump to a section by zero-based index
    SelectSection(usize),
    ReloadConfig,
    SkipSplash,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if is_interrupt(&key) {
        return Action::Quit;
    }

    // Any other key leaves the splash screen
    if app.is_splash() {
        return Action::SkipSplash;
    }

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,

        // Section navigation
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::Right, _) => Action::NextSection,
        (KeyCode::Tab, KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::PrevSection,
        (KeyCode::Left, _) => Action::PrevSection,
        (KeyCode::BackTab, _) => Action::PrevSection,

        // 1-9 jump straight to a section
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::SelectSection(c as usize - '1' as usize)
        }

        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::ReloadConfig,

        _ => Action::None,
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Apply an action that only touches app state
///
/// Returns `false` for actions the caller must handle itself
/// (currently only `ReloadConfig`, which needs the config file).
pub fn apply_action(app: &mut App, action: Action) -> bool {
    match action {
        Action::Quit => app.quit(),
        Action::NextSection => app.next_section(),
        Action::PrevSection => app.prev_section(),
        Action::SelectSection(index) => app.select_section(index),
        Action::SkipSplash => app.skip_splash(),
        Action::ReloadConfig => return false,
        Action::None => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    use marquee_core::AppConfig;

    use crate::theme::Theme;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(splash_ms: u64) -> App {
        let mut config = AppConfig::default();
        config.ui.splash_duration_ms = splash_ms;
        App::new(Arc::new(config), Theme::default(), Instant::now())
    }

    #[tokio::test]
    async fn test_navigation_keys() {
        let app = app(0);
        assert_eq!(handle_key_event(key(KeyCode::Char('l')), &app), Action::NextSection);
        assert_eq!(handle_key_event(key(KeyCode::Tab), &app), Action::NextSection);
        assert_eq!(handle_key_event(key(KeyCode::Left), &app), Action::PrevSection);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT), &app),
            Action::PrevSection
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('3')), &app), Action::SelectSection(2));
        assert_eq!(handle_key_event(key(KeyCode::Char('r')), &app), Action::ReloadConfig);
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &app), Action::None);
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let app = app(0);
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &app), Action::Quit);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &app),
            Action::Quit
        );
    }

    #[tokio::test]
    async fn test_splash_swallows_keys_except_interrupt() {
        let app = app(3000);
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::SkipSplash);
        assert_eq!(handle_key_event(key(KeyCode::Char('l')), &app), Action::SkipSplash);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &app),
            Action::Quit
        );
    }

    #[tokio::test]
    async fn test_apply_action() {
        let mut app = app(0);
        assert!(apply_action(&mut app, Action::SelectSection(1)));
        assert_eq!(app.active, 1);
        assert!(!apply_action(&mut app, Action::ReloadConfig));
        assert!(apply_action(&mut app, Action::Quit));
        assert!(app.should_quit);
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::state::{App, Effect, InputMode};

/// Route a key press to the app; returns the effects it started
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    if key.kind != KeyEventKind::Press {
        return Vec::new();
    }
    log_key_event!(app.log_config, "{:?} {:?} in {:?}", key.code, key.modifiers, app.input_mode);

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Vec::new();
    }

    // Priority 1: Help modal
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            app.toggle_help();
        }
        return Vec::new();
    }

    match app.input_mode {
        InputMode::Composing => handle_composer_keys(app, key),
        InputMode::Editing(_) => handle_edit_keys(app, key),
        InputMode::Navigation => handle_navigation_keys(app, key),
    }
}

fn is_save(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s')
}

pub fn handle_composer_keys(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    if key.code == KeyCode::Esc {
        app.close_composer();
        return Vec::new();
    }
    if is_save(&key) {
        return app.submit_composer();
    }
    app.handle_composer_input(key);
    Vec::new()
}

pub fn handle_edit_keys(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    if is_save(&key) {
        return app.save_edit();
    }
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => return app.save_edit(),
        KeyCode::Backspace => app.pop_edit_char(),
        KeyCode::Char(c) => app.push_edit_char(c),
        _ => {}
    }
    Vec::new()
}

pub fn handle_navigation_keys(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Left => app.go_back(),
            KeyCode::Right => app.go_forward(),
            _ => Vec::new(),
        };
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('a') => return app.open_all_posts(),
        KeyCode::Char('f') => return app.open_following(),
        KeyCode::Char('p') => return app.open_own_profile(),
        KeyCode::Enter | KeyCode::Char('u') => return app.open_selected_profile(),
        KeyCode::Char('l') => return app.toggle_like_selected(),
        KeyCode::Char('F') => return app.toggle_follow(),
        KeyCode::Char('e') => app.begin_edit_selected(),
        KeyCode::Char('n') => app.open_composer(),
        KeyCode::Char('[') => return app.go_back(),
        KeyCode::Char(']') => return app.go_forward(),
        KeyCode::Char('r') => return app.reload(),
        _ => {}
    }
    Vec::new()
}

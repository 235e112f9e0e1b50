mod dialog;
mod navigate;
mod search;

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use dialog::{handle_creation, handle_detail};
use navigate::handle_navigate;
use search::handle_search;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl-C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // The creation dialog intercepts everything while open
    if app.creation.is_some() {
        handle_creation(app, key, now);
        return;
    }

    if app.show_detail {
        handle_detail(app, key);
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
    }
}

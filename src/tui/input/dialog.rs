use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

/// Keys while the creation dialog is open
pub(super) fn handle_creation(app: &mut App, key: KeyEvent, now: Instant) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.cancel_creation(now),
        (_, KeyCode::Enter) => app.submit_creation(),
        _ => {
            let Some(form) = app.creation.as_mut() else {
                return;
            };
            match (key.modifiers, key.code) {
                (_, KeyCode::Tab) | (_, KeyCode::Down) => form.focus_next(),
                (_, KeyCode::BackTab) | (_, KeyCode::Up) => form.focus_prev(),
                (_, KeyCode::Left) => form.move_left(),
                (_, KeyCode::Right) => form.move_right(),
                (_, KeyCode::Backspace) => form.backspace(),
                (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
                    form.insert_char(c)
                }
                _ => {}
            }
        }
    }
}

/// Keys while the detail popup is showing
pub(super) fn handle_detail(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.show_detail = false,
        _ => {}
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// Rows moved by PageUp/PageDown
const PAGE: isize = 10;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,

        // Esc backs out of an active filter first
        (_, KeyCode::Esc) => {
            if app.view.query().is_empty() {
                app.should_quit = true;
            } else {
                app.set_query("");
            }
        }

        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => app.move_cursor(1),
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => app.move_cursor(-1),
        (_, KeyCode::PageDown) => app.move_cursor(PAGE),
        (_, KeyCode::PageUp) => app.move_cursor(-PAGE),
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => app.move_cursor(PAGE),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.move_cursor(-PAGE),
        (_, KeyCode::Char('g')) | (_, KeyCode::Home) => app.cursor_to_start(),
        (_, KeyCode::Char('G')) | (_, KeyCode::End) => app.cursor_to_end(),

        (_, KeyCode::Char('/')) => {
            app.search_input = app.view.query().to_string();
            app.mode = Mode::Search;
        }

        (_, KeyCode::Char('n')) | (_, KeyCode::Char('a')) => app.open_creation(),

        (_, KeyCode::Char('r')) => app.reload(),

        (_, KeyCode::Enter) => {
            if app.selected_record().is_some() {
                app.show_detail = true;
            }
        }

        (_, KeyCode::Char('x')) => app.view.dismiss_notification(),

        _ => {}
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode::prev_grapheme_boundary;

/// Search prompt: every edit re-filters the list from the full snapshot.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Cancel search and drop the filter
        (_, KeyCode::Esc) => {
            app.set_query("");
            app.mode = Mode::Navigate;
        }

        // Keep the filter, back to the list
        (_, KeyCode::Enter) => {
            app.mode = Mode::Navigate;
        }

        (_, KeyCode::Backspace) => {
            let mut query = app.search_input.clone();
            if let Some(prev) = prev_grapheme_boundary(&query, query.len()) {
                query.truncate(prev);
                app.set_query(&query);
            }
        }

        // Ctrl-U clears the prompt
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.set_query(""),

        (_, KeyCode::Down) => app.move_cursor(1),
        (_, KeyCode::Up) => app.move_cursor(-1),

        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            let mut query = app.search_input.clone();
            query.push(c);
            app.set_query(&query);
        }

        _ => {}
    }
}

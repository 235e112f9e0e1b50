use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

use super::spans_width;

const NAVIGATE_HINT: &str = "/ search  n new  r reload  q quit";
const SEARCH_HINT: &str = "Enter keep  Esc clear";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (mut spans, hint) = match app.mode {
        Mode::Navigate => {
            // Show an active filter dimmed, like a remembered search
            let spans = if app.view.query().is_empty() {
                Vec::new()
            } else {
                vec![Span::styled(
                    format!("/{}", app.view.query()),
                    Style::default().fg(app.theme.dim).bg(bg),
                )]
            };
            (spans, NAVIGATE_HINT)
        }
        Mode::Search => {
            // Search prompt: /pattern▌
            let spans = vec![
                Span::styled(
                    format!("/{}", app.search_input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)), // ▌ cursor
            ];
            (spans, SEARCH_HINT)
        }
    };

    let content_width = spans_width(&spans);
    let hint_width = display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

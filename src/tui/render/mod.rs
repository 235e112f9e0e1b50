pub mod banner;
pub mod creation_dialog;
pub mod detail_popup;
pub mod status_row;
pub mod table;
#[cfg(test)]
pub mod test_helpers;

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use regex::Regex;

use crate::util::unicode;

use super::app::App;

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    render_at(frame, app, Utc::now());
}

/// Render with an explicit wall clock. The NEW badge is derived from `now`
/// on every frame rather than stored.
pub fn render_at(frame: &mut Frame, app: &mut App, now: DateTime<Utc>) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title (1 row) | table | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    table::render_table(frame, app, chunks[1], now);
    status_row::render_status_row(frame, app, chunks[2]);

    if app.show_detail {
        detail_popup::render_detail_popup(frame, app, area, now);
    }

    if app.creation.is_some() {
        creation_dialog::render_creation_dialog(frame, app, area);
    }

    // Notification sits above everything, like a snackbar
    if app.view.notification().visible {
        banner::render_banner(frame, app, area);
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(
            " Projects",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.source_label),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ];

    if !app.view.loading() {
        let count = format!(
            "{}/{} ",
            app.view.active_records().len(),
            app.view.canonical_records().len()
        );
        let used = spans_width(&spans);
        let count_w = unicode::display_width(&count);
        if used + count_w < width {
            spans.push(Span::styled(
                " ".repeat(width - used - count_w),
                Style::default().bg(bg),
            ));
            spans.push(Span::styled(count, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if last_end < text.len() || last_end == 0 {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Pad spans to fill `target_width` with background.
pub(super) fn pad_to_width(spans: &mut Vec<Span<'_>>, target_width: usize, pad_style: Style) {
    let used = spans_width(spans);
    if used < target_width {
        spans.push(Span::styled(" ".repeat(target_width - used), pad_style));
    }
}

/// Word-wrap `text` into lines no wider than `max_width`, each starting with `indent`
pub(super) fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    let indent_w = unicode::display_width(indent);
    let mut lines = Vec::new();
    let mut current = indent.to_string();
    let mut current_w = indent_w;

    for word in text.split_whitespace() {
        let word_w = unicode::display_width(word);
        let space = if current_w == indent_w { 0 } else { 1 };
        if current_w + space + word_w > max_width && current_w > indent_w {
            lines.push(current);
            current = indent.to_string();
            current_w = indent_w;
        }
        if current_w > indent_w {
            current.push(' ');
            current_w += 1;
        }
        current.push_str(word);
        current_w += word_w;
    }
    if current_w > indent_w || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Rect of `width` x `height` centered in `area`, clipped to it
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;

    #[test]
    fn highlight_splits_on_matches() {
        let re = Regex::new("(?i)ra").unwrap();
        let mut spans = Vec::new();
        let base = Style::default();
        let hl = Style::default().add_modifier(Modifier::BOLD);
        push_highlighted_spans(&mut spans, "Rust crate", base, hl, Some(&re));
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["Rust c", "ra", "te"]);
        assert_eq!(spans[1].style, hl);
    }

    #[test]
    fn highlight_without_match_is_single_span() {
        let re = Regex::new("zz").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, "abc", Style::default(), Style::default(), Some(&re));
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "abc");
    }

    #[test]
    fn full_screen_shows_title_table_and_status() {
        let mut app = app_with_records(sample_records());
        let output = render_app(&mut app);
        let first = output.lines().next().unwrap();
        assert!(first.starts_with(" Projects  test"));
        assert!(first.ends_with("3/3"));
        assert!(output.contains("NAME"));
        assert!(output.contains("atlas"));
        assert!(output.contains("/ search"));
    }

    #[test]
    fn notification_and_dialog_render_together() {
        let mut app = app_with_records(sample_records());
        app.open_creation();
        app.view
            .show_notification("Project zephyr created", std::time::Instant::now());
        let output = render_app(&mut app);
        assert!(output.contains("Project zephyr created"));
        assert!(output.contains("New project"));
    }

    #[test]
    fn wrap_text_breaks_on_words() {
        assert_eq!(
            wrap_text(" ", "one two three four", 10),
            vec![" one two", " three", " four"]
        );
        assert_eq!(wrap_text(" ", "", 10), vec![" "]);
    }

    #[test]
    fn centered_rect_is_clipped() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect_fixed(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect_fixed(40, 40, area), area);
    }
}

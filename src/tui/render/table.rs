use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use regex::Regex;

use crate::model::ProjectRecord;
use crate::ops::freshness::{age_label, is_new};
use crate::tui::app::App;
use crate::util::unicode::{display_width, fit_to_width};

use super::{pad_to_width, push_highlighted_spans};

const NAME_W: usize = 24;
const TECH_W: usize = 12;
const ADDED_W: usize = 8;
const BADGE: &str = "NEW";
/// Below this width only name and age are shown
const NARROW_W: usize = 60;

struct Columns {
    name: usize,
    desc: usize,
    tech: usize,
    added: usize,
}

impl Columns {
    fn for_width(width: usize) -> Self {
        // 2 cells of cursor gutter, 1 cell between columns
        if width >= NARROW_W {
            let desc = width.saturating_sub(2 + NAME_W + TECH_W + ADDED_W + 3);
            Columns {
                name: NAME_W,
                desc,
                tech: TECH_W,
                added: ADDED_W,
            }
        } else {
            Columns {
                name: width.saturating_sub(2 + ADDED_W + 1),
                desc: 0,
                tech: 0,
                added: ADDED_W,
            }
        }
    }

    fn wide(&self) -> bool {
        self.desc > 0
    }
}

/// Render the project table: header row plus either the loading line,
/// an empty-state line, or the visible slice of active records.
pub fn render_table(frame: &mut Frame, app: &mut App, area: Rect, now: DateTime<Utc>) {
    let width = area.width as usize;
    let height = area.height as usize;
    if height == 0 {
        return;
    }
    let cols = Columns::for_width(width);
    let bg = app.theme.background;

    let mut lines: Vec<Line> = vec![header_line(app, &cols, width)];
    let body_h = height - 1;

    if app.view.loading() {
        lines.push(message_line("Loading projects\u{2026}", app.theme.dim, bg));
    } else if app.view.active_records().is_empty() {
        let (text, color) = empty_message(app);
        lines.push(message_line(&text, color, bg));
    } else {
        adjust_scroll(app, body_h);
        let search_re = app.highlight_re();
        let rows = app.view.active_records();
        let end = (app.scroll_offset + body_h).min(rows.len());
        for (idx, record) in rows.iter().enumerate().take(end).skip(app.scroll_offset) {
            lines.push(record_line(
                app,
                record,
                &cols,
                width,
                idx == app.cursor,
                is_new(record, now, app.new_days),
                now,
                search_re.as_ref(),
            ));
        }
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

/// Keep the cursor row on screen
fn adjust_scroll(app: &mut App, body_h: usize) {
    if body_h == 0 {
        return;
    }
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + body_h {
        app.scroll_offset = app.cursor + 1 - body_h;
    }
}

fn header_line<'a>(app: &App, cols: &Columns, width: usize) -> Line<'a> {
    let style = Style::default()
        .fg(app.theme.header)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD);
    let mut text = String::from("  ");
    text.push_str(&fit_to_width("NAME", cols.name));
    if cols.wide() {
        text.push(' ');
        text.push_str(&fit_to_width("DESCRIPTION", cols.desc));
        text.push(' ');
        text.push_str(&fit_to_width("TECH", cols.tech));
    }
    text.push(' ');
    text.push_str(&fit_to_width("ADDED", cols.added));
    let mut spans = vec![Span::styled(text, style)];
    pad_to_width(&mut spans, width, Style::default().bg(app.theme.background));
    Line::from(spans)
}

fn message_line<'a>(text: &str, fg: Color, bg: Color) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {}", text),
        Style::default().fg(fg).bg(bg),
    ))
}

fn empty_message(app: &App) -> (String, Color) {
    if app.view.canonical_records().is_empty() {
        if let Some(err) = app.view.last_error() {
            return (err.to_string(), app.theme.red);
        }
        return (
            "No projects yet. Press n to add one.".to_string(),
            app.theme.dim,
        );
    }
    (
        format!("No projects match \u{201C}{}\u{201D}", app.view.query()),
        app.theme.dim,
    )
}

#[allow(clippy::too_many_arguments)]
fn record_line<'a>(
    app: &App,
    record: &ProjectRecord,
    cols: &Columns,
    width: usize,
    is_cursor: bool,
    fresh: bool,
    now: DateTime<Utc>,
    search_re: Option<&Regex>,
) -> Line<'a> {
    let bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let base = Style::default().fg(app.theme.text).bg(bg);
    let bright = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let hl = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg)
        .add_modifier(Modifier::BOLD);

    let mut spans: Vec<Span> = Vec::new();
    if is_cursor {
        spans.push(Span::styled(
            "\u{25B8} ",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    } else {
        spans.push(Span::styled("  ", base));
    }

    // Name, with the NEW badge right after it when the record is fresh
    let badge_w = display_width(BADGE) + 1;
    if fresh && cols.name > badge_w {
        let name = fit_to_width(&record.name, cols.name - badge_w);
        let name = name.trim_end();
        push_highlighted_spans(&mut spans, name, bright, hl, search_re);
        spans.push(Span::styled(" ", base));
        spans.push(Span::styled(
            BADGE,
            Style::default()
                .fg(app.theme.new_badge_fg)
                .bg(app.theme.new_badge_bg)
                .add_modifier(Modifier::BOLD),
        ));
        let used = display_width(name) + badge_w;
        if used < cols.name {
            spans.push(Span::styled(" ".repeat(cols.name - used), base));
        }
    } else {
        let name = fit_to_width(&record.name, cols.name);
        push_highlighted_spans(&mut spans, &name, bright, hl, search_re);
    }

    if cols.wide() {
        spans.push(Span::styled(" ", base));
        let desc = fit_to_width(&record.description, cols.desc);
        push_highlighted_spans(&mut spans, &desc, base, hl, search_re);
        spans.push(Span::styled(" ", base));
        let tech = fit_to_width(&record.tech, cols.tech);
        let tech_style = Style::default().fg(app.theme.tech_color(&record.tech)).bg(bg);
        push_highlighted_spans(&mut spans, &tech, tech_style, hl, search_re);
    }

    spans.push(Span::styled(" ", base));
    spans.push(Span::styled(
        fit_to_width(&age_label(record, now), cols.added),
        dim,
    ));

    pad_to_width(&mut spans, width, Style::default().bg(bg));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::super::test_helpers::*;
    use super::*;
    use crate::io::source::SourceError;
    use crate::io::worker::WorkerEvent;
    use crate::tui::app::Effect;

    fn table_output(app: &mut App, w: u16, h: u16, now: DateTime<Utc>) -> String {
        render_to_string(w, h, |frame, area| render_table(frame, app, area, now))
    }

    fn row_containing<'a>(output: &'a str, needle: &str) -> &'a str {
        output
            .lines()
            .find(|l| l.contains(needle))
            .unwrap_or_else(|| panic!("no row containing {needle:?} in\n{output}"))
    }

    #[test]
    fn loading_shows_only_the_loading_line() {
        let mut app = loading_app();
        let output = table_output(&mut app, TERM_W, 10, Utc::now());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("NAME"));
        assert_eq!(lines[1], "  Loading projects\u{2026}");
    }

    #[test]
    fn rows_are_newest_first_with_badges() {
        let now = Utc::now();
        let mut app = app_with_records(vec![
            ProjectRecord::new("old", "Legacy thing", "Perl", days_ago(now, 40)),
            ProjectRecord::new("fresh", "Brand new", "Rust", now),
            ProjectRecord::new("recent", "Last week", "Go", days_ago(now, 3)),
        ]);
        let output = table_output(&mut app, TERM_W, 10, now);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].contains("fresh NEW"));
        assert!(lines[1].contains("today"));
        assert!(lines[2].contains("recent NEW"));
        assert!(lines[2].contains("3d ago"));
        assert!(lines[3].contains("old"));
        assert!(!lines[3].contains("NEW"));
        assert!(lines[3].contains("40d ago"));
    }

    #[test]
    fn cursor_row_has_marker() {
        let mut app = app_with_records(sample_records());
        app.move_cursor(1);
        let output = table_output(&mut app, TERM_W, 10, Utc::now());
        assert!(row_containing(&output, "beacon").starts_with("\u{25B8} beacon"));
        assert!(row_containing(&output, "atlas").starts_with("  atlas"));
    }

    #[test]
    fn narrow_layout_drops_description_and_tech() {
        let mut app = app_with_records(sample_records());
        let output = table_output(&mut app, 40, 10, Utc::now());
        assert!(!output.contains("DESCRIPTION"));
        assert!(!output.contains("Tile server"));
        assert!(row_containing(&output, "compass").contains("30d ago"));
    }

    #[test]
    fn empty_filter_result_explains_itself() {
        let mut app = app_with_records(sample_records());
        app.set_query("zzz");
        let output = table_output(&mut app, TERM_W, 10, Utc::now());
        assert!(output.contains("No projects match \u{201C}zzz\u{201D}"));
    }

    #[test]
    fn empty_catalog_hints_at_creation() {
        let mut app = app_with_records(vec![]);
        let output = table_output(&mut app, TERM_W, 10, Utc::now());
        assert!(output.contains("No projects yet. Press n to add one."));
    }

    #[test]
    fn failed_first_load_shows_error() {
        let mut app = loading_app();
        app.reload();
        let ticket = match app.take_effects().as_slice() {
            [Effect::Fetch(t)] => *t,
            other => panic!("unexpected effects {:?}", other),
        };
        app.handle_worker_event(
            WorkerEvent::Fetched {
                ticket,
                result: Err(SourceError::Rejected("backend down".into())),
            },
            Instant::now(),
        );
        let output = table_output(&mut app, TERM_W, 10, Utc::now());
        assert!(output.contains("Could not load projects"));
        assert!(output.contains("backend down"));
    }

    #[test]
    fn scroll_follows_cursor() {
        let now = Utc::now();
        let records: Vec<ProjectRecord> = (0..20)
            .map(|i| ProjectRecord::new(format!("p{:02}", i), "", "", days_ago(now, i)))
            .collect();
        let mut app = app_with_records(records);
        app.cursor_to_end();
        // 1 header + 5 body rows
        let output = table_output(&mut app, TERM_W, 6, now);
        assert_eq!(app.scroll_offset, 15);
        assert!(output.contains("p19"));
        assert!(!output.contains("p14"));

        app.cursor_to_start();
        let output = table_output(&mut app, TERM_W, 6, now);
        assert_eq!(app.scroll_offset, 0);
        assert!(output.contains("p00"));
    }

    #[test]
    fn malformed_timestamp_renders_unknown() {
        let mut record = ProjectRecord::new("ghost", "", "", Utc::now());
        record.created_at = None;
        record.created_at_raw = Some("not a date".into());
        let mut app = app_with_records(vec![record]);
        let output = table_output(&mut app, TERM_W, 10, Utc::now());
        let row = row_containing(&output, "ghost");
        assert!(row.contains("unknown"));
        assert!(!row.contains("NEW"));
    }
}

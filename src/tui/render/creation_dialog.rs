use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::creation::{CreationForm, Field};
use crate::util::unicode::{display_width, truncate_to_width};

use super::{centered_rect_fixed, pad_to_width, wrap_text};

const LABEL_W: usize = 13;

/// Render the "new project" dialog over the list
pub fn render_creation_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = app.creation.as_ref() else {
        return;
    };

    let popup_w: u16 = 60.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" New project", header_style)),
        Line::from(""),
    ];

    for field in Field::ALL {
        lines.push(field_line(app, form, field, inner_w));
    }
    lines.push(Line::from(""));

    if form.submitting {
        lines.push(Line::from(Span::styled(" Saving\u{2026}", dim_style)));
    } else if let Some(err) = &form.error {
        let err_style = Style::default().fg(app.theme.red).bg(bg);
        for s in wrap_text(" ", err, inner_w) {
            lines.push(Line::from(Span::styled(s, err_style)));
        }
    }

    lines.push(Line::from(Span::styled(
        " Tab next field  Enter create  Esc cancel",
        dim_style,
    )));

    let popup_h = ((lines.len() as u16) + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(text_style);
    frame.render_widget(
        Paragraph::new(lines).block(block).style(text_style),
        overlay_area,
    );
}

fn field_line<'a>(app: &App, form: &CreationForm, field: Field, inner_w: usize) -> Line<'a> {
    let bg = app.theme.background;
    let focused = field == form.focus;
    let label_style = if focused {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    let value_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor_style = Style::default().fg(app.theme.highlight).bg(bg);

    let mut spans = vec![Span::styled(
        format!(" {:<width$}", field.label(), width = LABEL_W - 1),
        label_style,
    )];

    let value = form.value(field);
    // Keep room for the cursor cell
    let room = inner_w.saturating_sub(LABEL_W + 1);
    if focused && !form.submitting {
        let cursor = form.cursor.min(value.len());
        let (before, after) = value.split_at(cursor);
        // Scroll so the cursor stays visible in long values
        let before = tail_to_width(before, room);
        let after = truncate_to_width(after, room.saturating_sub(display_width(&before)));
        spans.push(Span::styled(before, value_style));
        spans.push(Span::styled("\u{258C}", cursor_style)); // ▌ cursor
        spans.push(Span::styled(after, value_style));
    } else {
        spans.push(Span::styled(truncate_to_width(value, room + 1), value_style));
    }

    pad_to_width(&mut spans, inner_w, Style::default().bg(bg));
    Line::from(spans)
}

/// The longest suffix of `s` that fits in `max_cells`
fn tail_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let mut start = s.len();
    for (idx, _) in s.char_indices().rev() {
        if display_width(&s[idx..]) > max_cells {
            break;
        }
        start = idx;
    }
    s[start..].to_string()
}

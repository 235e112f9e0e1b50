use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ops::freshness::{age_label, is_new};
use crate::tui::app::App;

use super::{centered_rect_fixed, wrap_text};

const KEY_W: usize = 10;

/// Render the detail popup for the record under the cursor
pub fn render_detail_popup(frame: &mut Frame, app: &App, area: Rect, now: DateTime<Utc>) {
    let Some(record) = app.selected_record() else {
        return;
    };

    let popup_w: u16 = 64.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(app.theme.dim).bg(bg);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright_style = Style::default().fg(app.theme.text_bright).bg(bg);

    let mut title = vec![Span::styled(format!(" {}", record.name), header_style)];
    if is_new(record, now, app.new_days) {
        title.push(Span::styled(" ", text_style));
        title.push(Span::styled(
            "NEW",
            Style::default()
                .fg(app.theme.new_badge_fg)
                .bg(app.theme.new_badge_bg)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let mut lines: Vec<Line> = vec![Line::from(title), Line::from("")];

    let description = if record.description.is_empty() {
        "\u{2014}"
    } else {
        record.description.as_str()
    };
    let indent = " ".repeat(KEY_W + 1);
    for (i, s) in wrap_text(&indent, description, inner_w).into_iter().enumerate() {
        let key = if i == 0 { "Summary" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<width$}", key, width = KEY_W), key_style),
            Span::styled(s[indent.len()..].to_string(), text_style),
        ]));
    }

    let tech_style = Style::default()
        .fg(app.theme.tech_color(&record.tech))
        .bg(bg);
    lines.push(row("Tech", &record.tech, key_style, tech_style));

    let created = match (&record.created_at, &record.created_at_raw) {
        (Some(ts), _) => format!(
            "{} ({})",
            ts.format("%Y-%m-%d %H:%M UTC"),
            age_label(record, now)
        ),
        (None, Some(raw)) => format!("{} (unreadable)", raw),
        (None, None) => "unknown".to_string(),
    };
    lines.push(row("Created", &created, key_style, text_style));

    if let Some(route) = app.selected_route() {
        lines.push(row("Open", &route, key_style, bright_style));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Esc close", key_style)));

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

fn row<'a>(key: &str, value: &str, key_style: Style, value_style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {:<width$}", key, width = KEY_W), key_style),
        Span::styled(value.to_string(), value_style),
    ])
}

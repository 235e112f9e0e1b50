use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the notification banner at the top center of the screen
pub fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let notification = app.view.notification();
    if !notification.visible || area.height < 3 {
        return;
    }

    let max_w = area.width.saturating_sub(4) as usize;
    // 2 border cells + 1 space each side
    let text = truncate_to_width(&notification.text, max_w.saturating_sub(4));
    let popup_w = (display_width(&text) + 4).min(max_w.max(1)) as u16;
    let x = area.x + area.width.saturating_sub(popup_w) / 2;
    let banner_area = Rect::new(x, area.y + 1, popup_w, 3).intersection(area);

    let bg = app.theme.notification_bg;
    let style = Style::default()
        .fg(app.theme.notification_fg)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    frame.render_widget(Clear, banner_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.notification_fg).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(Line::from(Span::styled(format!(" {} ", text), style)))
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, banner_area);
}

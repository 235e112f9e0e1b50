use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::worker::WorkerEvent;
use crate::model::{CatalogConfig, ProjectRecord};
use crate::tui::app::{App, Effect};

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen at the default size
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| {
        super::render_at(frame, app, Utc::now())
    })
}

/// Three projects: atlas (today), beacon (2 days), compass (30 days).
pub fn sample_records() -> Vec<ProjectRecord> {
    let now = Utc::now();
    vec![
        ProjectRecord::new("atlas", "Tile server", "Rust", now),
        ProjectRecord::new("beacon", "Alerting daemon", "Go", now - Duration::days(2)),
        ProjectRecord::new(
            "compass",
            "Route planner",
            "TypeScript",
            now - Duration::days(30),
        ),
    ]
}

/// App that has just applied a successful fetch of `records`
pub fn app_with_records(records: Vec<ProjectRecord>) -> App {
    let mut app = App::new(&CatalogConfig::default(), "test");
    let ticket = match app.take_effects().as_slice() {
        [Effect::Fetch(t)] => *t,
        other => panic!("unexpected effects {:?}", other),
    };
    app.handle_worker_event(
        WorkerEvent::Fetched {
            ticket,
            result: Ok(records),
        },
        Instant::now(),
    );
    app
}

/// App still waiting on its first fetch
pub fn loading_app() -> App {
    let mut app = App::new(&CatalogConfig::default(), "test");
    app.take_effects();
    app
}

pub fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::source::{ProjectSource, build_source, project_route};
use crate::io::watcher::SourceWatcher;
use crate::io::worker::{FetchTicket, Worker, WorkerEvent};
use crate::model::{CatalogConfig, NewProject, ProjectRecord};
use crate::ops::filter::highlight_regex;

use super::creation::{CreationForm, WorkflowSignal};
use super::input;
use super::render;
use super::theme::Theme;
use super::view_state::{FetchOutcome, ViewState};

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
}

/// Side effects requested by the app, carried out by the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(FetchTicket),
    Create(NewProject),
}

/// Main application state
pub struct App {
    pub view: ViewState,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Text in the search prompt
    pub search_input: String,
    /// Selected row in the active records
    pub cursor: usize,
    /// First visible table row
    pub scroll_offset: usize,
    /// The creation dialog, present exactly while `view.modal_open()`
    pub creation: Option<CreationForm>,
    /// Detail popup for the selected record
    pub show_detail: bool,
    /// Width of the NEW window in days
    pub new_days: i64,
    pub web_url: Option<String>,
    /// Where records come from, for the title bar
    pub source_label: String,
    effects: Vec<Effect>,
}

impl App {
    /// Build the app and request the initial load.
    pub fn new(config: &CatalogConfig, source_label: impl Into<String>) -> Self {
        let mut app = App {
            view: ViewState::new(Duration::from_millis(config.notification.duration_ms)),
            theme: Theme::from_config(&config.ui),
            mode: Mode::Navigate,
            should_quit: false,
            search_input: String::new(),
            cursor: 0,
            scroll_offset: 0,
            creation: None,
            show_detail: false,
            new_days: config.freshness.new_days,
            web_url: config.source.web_url.clone(),
            source_label: source_label.into(),
            effects: Vec::new(),
        };
        app.reload();
        app
    }

    /// Drain effects queued since the last call
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Refetch the project list
    pub fn reload(&mut self) {
        let ticket = self.view.initialize();
        self.effects.push(Effect::Fetch(ticket));
    }

    /// The record under the cursor. Nothing is selectable while loading.
    pub fn selected_record(&self) -> Option<&ProjectRecord> {
        if self.view.loading() {
            return None;
        }
        self.view.active_records().get(self.cursor)
    }

    /// Route of the selected record ("view project")
    pub fn selected_route(&self) -> Option<String> {
        self.selected_record()
            .map(|r| project_route(self.web_url.as_deref(), &r.name))
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.view.active_records().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, len as isize - 1) as usize;
    }

    pub fn cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.view.active_records().len().saturating_sub(1);
    }

    /// Update the search text and refilter
    pub fn set_query(&mut self, query: &str) {
        self.search_input = query.to_string();
        self.view.apply_query(query);
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Regex for highlighting the current query in table cells
    pub fn highlight_re(&self) -> Option<Regex> {
        highlight_regex(self.view.query())
    }

    // -----------------------------------------------------------------------
    // Creation dialog
    // -----------------------------------------------------------------------

    pub fn open_creation(&mut self) {
        if self.view.open_creation_workflow() {
            self.creation = Some(CreationForm::new());
            self.show_detail = false;
        }
    }

    pub fn submit_creation(&mut self) {
        let payload = self.creation.as_mut().and_then(|form| form.submit());
        if let Some(project) = payload {
            self.effects.push(Effect::Create(project));
        }
    }

    pub fn cancel_creation(&mut self, now: Instant) {
        if let Some(form) = &self.creation {
            let signals = form.cancel();
            self.apply_signals(signals, now);
        }
    }

    fn apply_signals(&mut self, signals: Vec<WorkflowSignal>, now: Instant) {
        for signal in signals {
            match signal {
                WorkflowSignal::Notify(text) => self.view.show_notification(text, now),
                WorkflowSignal::Closed => {
                    self.creation = None;
                    let ticket = self.view.close_creation_workflow();
                    self.effects.push(Effect::Fetch(ticket));
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Worker results and timers
    // -----------------------------------------------------------------------

    pub fn handle_worker_event(&mut self, event: WorkerEvent, now: Instant) {
        match event {
            WorkerEvent::Fetched { ticket, result } => {
                let selected = self
                    .view
                    .active_records()
                    .get(self.cursor)
                    .map(|r| r.name.clone());
                if self.view.complete_fetch(ticket, result, now) == FetchOutcome::Applied {
                    self.search_input = self.view.query().to_string();
                    self.restore_cursor(selected.as_deref());
                }
            }
            WorkerEvent::Created { name, result } => match self.creation.as_mut() {
                Some(form) => {
                    let signals = form.finish(&name, result);
                    self.apply_signals(signals, now);
                }
                None => {
                    // Dialog was cancelled while the request was in flight
                    let text = match result {
                        Ok(()) => format!("Project {} created", name),
                        Err(e) => format!("Could not create project: {}", e),
                    };
                    self.view.show_notification(text, now);
                    self.reload();
                }
            },
        }
    }

    /// Keep the cursor on the same project (by name) across a reload
    fn restore_cursor(&mut self, selected: Option<&str>) {
        let rows = self.view.active_records();
        self.cursor = selected
            .and_then(|name| rows.iter().position(|r| r.name == name))
            .unwrap_or(0);
        if self.cursor >= rows.len() {
            self.cursor = rows.len().saturating_sub(1);
        }
    }

    /// Advance timers; true if the screen needs a redraw
    pub fn tick(&mut self, now: Instant) -> bool {
        self.view.tick(now)
    }
}

/// Run the TUI application against the configured source
pub fn run(config: CatalogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source: Arc<dyn ProjectSource> = Arc::from(build_source(&config.source)?);
    let watcher = match source.watch_path() {
        Some(path) => match SourceWatcher::start(path) {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!("live reload disabled: {}", e);
                None
            }
        },
        None => None,
    };
    let worker = Worker::new(Arc::clone(&source));
    let mut app = App::new(&config, source.describe());
    tracing::info!(source = %app.source_label, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &worker, watcher.as_ref());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn dispatch_effects(app: &mut App, worker: &Worker) {
    for effect in app.take_effects() {
        match effect {
            Effect::Fetch(ticket) => worker.fetch(ticket),
            Effect::Create(project) => worker.create(project),
        }
    }
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &Worker,
    watcher: Option<&SourceWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        dispatch_effects(app, worker);
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key, Instant::now());
        }

        for evt in worker.poll() {
            app.handle_worker_event(evt, Instant::now());
        }

        if watcher.is_some_and(|w| w.poll()) {
            tracing::debug!("source file changed");
            app.reload();
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::io::source::{ProjectSource, SourceError};
use crate::model::record::{NewProject, ProjectRecord};

/// Generation number of a fetch request. Later requests get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FetchTicket(pub u64);

/// Results sent from worker threads back to the TUI event loop.
#[derive(Debug)]
pub enum WorkerEvent {
    /// A fetch finished (successfully or not)
    Fetched {
        ticket: FetchTicket,
        result: Result<Vec<ProjectRecord>, SourceError>,
    },
    /// A create request finished
    Created {
        name: String,
        result: Result<(), SourceError>,
    },
}

/// Runs blocking source calls off the UI thread.
///
/// Every request gets its own short-lived thread; there is no cancellation,
/// so stale fetch results still arrive and must be filtered by ticket.
pub struct Worker {
    source: Arc<dyn ProjectSource>,
    tx: mpsc::Sender<WorkerEvent>,
    rx: mpsc::Receiver<WorkerEvent>,
}

impl Worker {
    pub fn new(source: Arc<dyn ProjectSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Worker { source, tx, rx }
    }

    /// Start fetching the full list for `ticket`.
    pub fn fetch(&self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tracing::debug!(ticket = ticket.0, "fetch issued");
        thread::spawn(move || {
            let result = source.fetch_all();
            let _ = tx.send(WorkerEvent::Fetched { ticket, result });
        });
    }

    /// Start creating `project`.
    pub fn create(&self, project: NewProject) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tracing::debug!(name = %project.name, "create issued");
        thread::spawn(move || {
            let result = source.create(&project);
            let _ = tx.send(WorkerEvent::Created {
                name: project.name,
                result,
            });
        });
    }

    /// Non-blocking poll for finished requests.
    /// Returns all queued events (may be empty).
    pub fn poll(&self) -> Vec<WorkerEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }

    /// Block until the next event or `timeout`.
    pub fn wait(&self, timeout: Duration) -> Option<WorkerEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}

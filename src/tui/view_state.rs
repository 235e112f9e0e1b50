//! The project list's state machine.
//!
//! `ViewState` owns everything the list view shows: the loading flag, the
//! last fetched snapshot, the filtered/sorted rows, whether the creation
//! dialog is open, and the notification banner. It does no I/O itself;
//! operations that need a fetch hand back a [`FetchTicket`] for the event
//! loop to pass to the worker, and the result comes back through
//! [`ViewState::complete_fetch`].

use std::time::{Duration, Instant};

use crate::io::source::SourceError;
use crate::io::worker::FetchTicket;
use crate::model::record::ProjectRecord;
use crate::ops::filter::filter_records;
use crate::ops::freshness::sort_by_freshness;

use super::notification::{DEFAULT_DURATION, Notification, NotificationTimer};

/// What happened to a fetch result handed to [`ViewState::complete_fetch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Records replaced the canonical snapshot
    Applied,
    /// The fetch failed; previous records kept, user notified
    Failed,
    /// A newer result was already applied; this one was dropped
    Stale,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    loading: bool,
    /// Last fetched snapshot, in fetch order
    canonical: Vec<ProjectRecord>,
    /// `canonical` filtered by `query`, newest first
    active: Vec<ProjectRecord>,
    query: String,
    modal_open: bool,
    notification: NotificationTimer,
    /// Most recently issued fetch
    issued: FetchTicket,
    /// Most recently applied (or failed) fetch
    applied: FetchTicket,
    last_error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(DEFAULT_DURATION)
    }
}

impl ViewState {
    /// A freshly mounted view: loading, nothing fetched yet.
    pub fn new(notification_duration: Duration) -> Self {
        ViewState {
            loading: true,
            canonical: Vec::new(),
            active: Vec::new(),
            query: String::new(),
            modal_open: false,
            notification: NotificationTimer::new(notification_duration),
            issued: FetchTicket(0),
            applied: FetchTicket(0),
            last_error: None,
        }
    }

    // -----------------------------------------------------------------------
    // Fetch lifecycle
    // -----------------------------------------------------------------------

    /// Start a (re)load. Sets `loading` and returns the ticket the fetch must
    /// be issued with.
    pub fn initialize(&mut self) -> FetchTicket {
        self.issued = FetchTicket(self.issued.0 + 1);
        self.loading = true;
        tracing::debug!(ticket = self.issued.0, "initialize");
        self.issued
    }

    /// Deliver the result of the fetch issued with `ticket`.
    ///
    /// Last response wins: a result older than (or equal to) one already
    /// applied is dropped. A successful result replaces the snapshot and
    /// resets the rows to the unfiltered, newest-first view; any query typed
    /// while the fetch was in flight is cleared rather than re-applied.
    /// A failure keeps the previous snapshot and raises a notification.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<ProjectRecord>, SourceError>,
        now: Instant,
    ) -> FetchOutcome {
        if ticket <= self.applied || ticket > self.issued {
            tracing::debug!(
                ticket = ticket.0,
                applied = self.applied.0,
                "discarding stale fetch result"
            );
            return FetchOutcome::Stale;
        }
        self.applied = ticket;
        if ticket == self.issued {
            self.loading = false;
        }

        match result {
            Ok(records) => {
                tracing::info!(ticket = ticket.0, count = records.len(), "projects loaded");
                self.canonical = records;
                self.query.clear();
                self.recompute();
                self.last_error = None;
                FetchOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(ticket = ticket.0, "fetch failed: {}", e);
                let msg = format!("Could not load projects: {}", e);
                self.last_error = Some(msg.clone());
                self.show_notification(msg, now);
                FetchOutcome::Failed
            }
        }
    }

    // -----------------------------------------------------------------------
    // Creation dialog
    // -----------------------------------------------------------------------

    /// Open the creation dialog. Returns false if it was already open.
    pub fn open_creation_workflow(&mut self) -> bool {
        if self.modal_open {
            return false;
        }
        self.modal_open = true;
        true
    }

    /// Close the creation dialog and reload. The reload is unconditional:
    /// the list is assumed stale whether or not anything was created.
    pub fn close_creation_workflow(&mut self) -> FetchTicket {
        self.modal_open = false;
        self.initialize()
    }

    // -----------------------------------------------------------------------
    // Query
    // -----------------------------------------------------------------------

    /// Filter the canonical snapshot by `query`. Each call starts over from
    /// the snapshot; queries do not narrow each other.
    pub fn apply_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.recompute();
    }

    fn recompute(&mut self) {
        let mut rows = filter_records(&self.canonical, &self.query);
        sort_by_freshness(&mut rows);
        self.active = rows;
    }

    // -----------------------------------------------------------------------
    // Notification
    // -----------------------------------------------------------------------

    /// Show `text`, replacing any current message and restarting its timer.
    pub fn show_notification(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        tracing::debug!(%text, "notification");
        self.notification.show(text, now);
    }

    /// Advance timers. Returns true when something visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notification.tick(now)
    }

    pub fn dismiss_notification(&mut self) {
        self.notification.dismiss();
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn canonical_records(&self) -> &[ProjectRecord] {
        &self.canonical
    }

    pub fn active_records(&self) -> &[ProjectRecord] {
        &self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn notification(&self) -> &Notification {
        self.notification.current()
    }

    /// Message from the last failed fetch, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

// src/sync/state.rs

use chrono::{DateTime, Utc};

use super::SyncError;
use crate::models::{leaderboard::LeaderboardEntry, submission::SubmissionRecord};

/// Everything the administrator view renders, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub submissions: Vec<SubmissionRecord>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub fetched_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    pub fn empty() -> Self {
        Self {
            submissions: Vec::new(),
            leaderboard: Vec::new(),
            fetched_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Nothing fetched successfully yet.
    Loading,
    Ready(DashboardSnapshot),
}

/// Issue order of a request. Later requests carry larger tickets; the
/// default ticket is never issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Data replaced.
    Applied,
    /// Request failed; the previous view is kept.
    Failed,
    /// A newer result was already applied; this one was discarded.
    Stale,
}

/// View state of one administrator session.
///
/// Data only ever moves forward: a success replaces it wholesale, a failure
/// never blanks it and a response older than the applied one is ignored.
#[derive(Debug, Clone)]
pub struct Dashboard {
    view: ViewState,
    next_ticket: u64,
    applied: Option<Ticket>,
    last_error: Option<String>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            view: ViewState::Loading,
            next_ticket: 0,
            applied: None,
            last_error: None,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        match &self.view {
            ViewState::Ready(snapshot) => Some(snapshot),
            ViewState::Loading => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, ViewState::Loading)
    }

    /// Error of the most recent failed request, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Must be called before the request is sent.
    pub fn issue(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    pub fn apply(
        &mut self,
        ticket: Ticket,
        result: Result<DashboardSnapshot, SyncError>,
    ) -> Outcome {
        if self.is_stale(ticket) {
            return Outcome::Stale;
        }
        match result {
            Ok(snapshot) => {
                self.accept(ticket, snapshot);
                Outcome::Applied
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Outcome::Failed
            }
        }
    }

    /// A successful clear shows an empty board, even if a fetch issued
    /// earlier is still in flight.
    pub fn apply_cleared(&mut self, ticket: Ticket, result: Result<(), SyncError>) -> Outcome {
        self.apply(ticket, result.map(|()| DashboardSnapshot::empty()))
    }

    fn is_stale(&self, ticket: Ticket) -> bool {
        self.applied.is_some_and(|applied| ticket <= applied)
    }

    fn accept(&mut self, ticket: Ticket, snapshot: DashboardSnapshot) {
        self.view = ViewState::Ready(snapshot);
        self.applied = Some(ticket);
        self.last_error = None;
    }
}

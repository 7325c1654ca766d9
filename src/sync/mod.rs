// src/sync/mod.rs

//! Client side of the administrator display: polls the server, keeps the
//! last good data on transient failures and drops late responses.

pub mod error;
pub mod poller;
pub mod source;
pub mod state;

pub use error::SyncError;
pub use poller::{PollConfig, PollHandle, spawn_poller};
pub use source::{DashboardSource, HttpDashboardSource};
pub use state::{Dashboard, DashboardSnapshot, Outcome, Ticket, ViewState};

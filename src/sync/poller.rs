// src/sync/poller.rs

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use super::{Dashboard, DashboardSource, Outcome, SyncError, Ticket};
use crate::{config::DashboardConfig, services::leaderboard::DEFAULT_LIMIT};

#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub interval: Duration,
    pub leaderboard_limit: i64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            leaderboard_limit: DEFAULT_LIMIT,
        }
    }
}

impl From<&DashboardConfig> for PollConfig {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            interval: config.poll_interval,
            leaderboard_limit: config.leaderboard_limit,
        }
    }
}

/// Running poll loop. Dropping the handle stops the loop.
pub struct PollHandle {
    source: Arc<dyn DashboardSource>,
    state: Arc<watch::Sender<Dashboard>>,
    task: JoinHandle<()>,
}

/// Starts polling right away, then once per `config.interval`.
///
/// Each poll waits for the previous one; ticks missed while a poll was slow
/// are skipped rather than bunched up.
pub fn spawn_poller(source: Arc<dyn DashboardSource>, config: PollConfig) -> PollHandle {
    let (tx, _rx) = watch::channel(Dashboard::new());
    let state = Arc::new(tx);

    let task = tokio::spawn({
        let source = source.clone();
        let state = state.clone();
        async move {
            let mut ticker = time::interval(config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                poll_once(source.as_ref(), &state, config.leaderboard_limit).await;
            }
        }
    });

    PollHandle {
        source,
        state,
        task,
    }
}

async fn poll_once(source: &dyn DashboardSource, state: &watch::Sender<Dashboard>, limit: i64) {
    let ticket = issue(state);
    let result = source.fetch_snapshot(limit).await;
    if let Err(e) = &result {
        tracing::warn!("Dashboard refresh failed, keeping last data: {}", e);
    }
    let outcome = publish(state, |d| d.apply(ticket, result));
    if outcome == Outcome::Stale {
        tracing::debug!("Discarded stale dashboard response");
    }
}

/// Issues a ticket without waking subscribers.
fn issue(state: &watch::Sender<Dashboard>) -> Ticket {
    let mut ticket = Ticket::default();
    state.send_if_modified(|d| {
        ticket = d.issue();
        false
    });
    ticket
}

fn publish(
    state: &watch::Sender<Dashboard>,
    apply: impl FnOnce(&mut Dashboard) -> Outcome,
) -> Outcome {
    let mut outcome = Outcome::Stale;
    state.send_if_modified(|d| {
        outcome = apply(d);
        outcome != Outcome::Stale
    });
    outcome
}

impl PollHandle {
    pub fn subscribe(&self) -> watch::Receiver<Dashboard> {
        self.state.subscribe()
    }

    pub fn current(&self) -> Dashboard {
        self.state.borrow().clone()
    }

    /// Clears both server-side collections and shows an empty board on
    /// success.
    pub async fn clear_all(&self) -> Result<(), SyncError> {
        let ticket = issue(&self.state);
        let result = self.source.clear_all().await;
        publish(&self.state, |d| d.apply_cleared(ticket, result.clone()));
        result
    }

    /// Stops polling. Same as dropping the handle.
    pub fn stop(self) {}
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// src/bin/dashboard.rs

//! Terminal administrator view: polls the server and logs the leaderboard
//! whenever it changes. Ctrl-C stops the loop.

use std::sync::Arc;

use phishsim::config::DashboardConfig;
use phishsim::sync::{Dashboard, HttpDashboardSource, PollConfig, ViewState, spawn_poller};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DashboardConfig::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false))
        .init();

    tracing::info!("Watching {}", config.backend_url);

    let source = HttpDashboardSource::new(config.backend_url.clone(), config.request_timeout)?;
    let handle = spawn_poller(Arc::new(source), PollConfig::from(&config));
    let mut rx = handle.subscribe();

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                render(&rx.borrow_and_update());
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping dashboard");
                break;
            }
        }
    }

    handle.stop();
    Ok(())
}

fn render(dashboard: &Dashboard) {
    match dashboard.view() {
        ViewState::Loading => {
            if let Some(e) = dashboard.last_error() {
                tracing::warn!("Waiting for server: {}", e);
            }
        }
        ViewState::Ready(snapshot) => {
            if let Some(e) = dashboard.last_error() {
                tracing::warn!("Showing data from {} ({})", snapshot.fetched_at, e);
                return;
            }
            tracing::info!(
                "{} submissions, {} students at risk",
                snapshot.submissions.len(),
                snapshot.leaderboard.len()
            );
            for (rank, entry) in snapshot.leaderboard.iter().enumerate() {
                tracing::info!(
                    "{:>2}. {:<24} {:<28} score {:>3}",
                    rank + 1,
                    entry.display_name,
                    entry.email,
                    entry.score
                );
            }
        }
    }
}

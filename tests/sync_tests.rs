// tests/sync_tests.rs

use std::{sync::Arc, time::Duration};

use phishsim::{
    routes,
    state::AppState,
    store::memory::{MemoryActionLog, MemorySubmissionStore},
    sync::{Dashboard, DashboardSource, HttpDashboardSource, PollConfig, spawn_poller},
};
use serde_json::json;
use tokio::sync::watch;
use url::Url;

async fn spawn_app() -> String {
    let state = AppState::new(MemorySubmissionStore::new(), MemoryActionLog::new());
    let app = routes::create_router(state, &[]);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

fn source_for(address: &str) -> HttpDashboardSource {
    HttpDashboardSource::new(Url::parse(address).unwrap(), Duration::from_secs(2)).unwrap()
}

fn fast() -> PollConfig {
    PollConfig {
        interval: Duration::from_millis(50),
        leaderboard_limit: 5,
    }
}

async fn wait_until(rx: &mut watch::Receiver<Dashboard>, pred: impl Fn(&Dashboard) -> bool) {
    tokio::time::timeout(Duration::from_secs(3), rx.wait_for(|d| pred(d)))
        .await
        .expect("timed out waiting for dashboard")
        .expect("poller stopped");
}

#[tokio::test]
async fn http_source_reads_what_the_server_stores() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/api/submissions", address))
        .json(&json!({"fullName": "Ann", "studentID": "S1", "email": "a@x.com"}))
        .send()
        .await
        .unwrap();

    let source = source_for(&address);
    let snapshot = source.fetch_snapshot(5).await.unwrap();

    assert_eq!(snapshot.submissions.len(), 1);
    assert_eq!(snapshot.submissions[0].score, 60);
    assert_eq!(snapshot.submissions[0].form.full_name, "Ann");
    assert_eq!(snapshot.leaderboard.len(), 1);
    assert_eq!(snapshot.leaderboard[0].subject_id, "S1");
}

#[tokio::test]
async fn poller_follows_the_server_and_clears() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let handle = spawn_poller(Arc::new(source_for(&address)), fast());
    let mut rx = handle.subscribe();

    wait_until(&mut rx, |d| !d.is_loading()).await;
    assert!(handle.current().snapshot().unwrap().submissions.is_empty());

    client
        .post(format!("{}/api/submissions", address))
        .json(&json!({"studentID": "S9"}))
        .send()
        .await
        .unwrap();

    wait_until(&mut rx, |d| {
        d.snapshot().is_some_and(|s| s.leaderboard.len() == 1)
    })
    .await;

    handle.clear_all().await.unwrap();
    let current = handle.current();
    let snapshot = current.snapshot().unwrap();
    assert!(snapshot.submissions.is_empty());
    assert!(snapshot.leaderboard.is_empty());

    let stored: Vec<serde_json::Value> = client
        .get(format!("{}/api/submissions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn unreachable_server_stays_loading() {
    // Grab a free port, then close it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
    drop(listener);

    let handle = spawn_poller(Arc::new(source_for(&address)), fast());
    let mut rx = handle.subscribe();

    wait_until(&mut rx, |d| d.last_error().is_some()).await;
    assert!(handle.current().is_loading());
}

// src/sync/source.rs

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use url::Url;

use super::{DashboardSnapshot, SyncError};
use crate::models::{leaderboard::LeaderboardEntry, submission::SubmissionRecord};

/// Where the administrator view gets its data from.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn fetch_submissions(&self) -> Result<Vec<SubmissionRecord>, SyncError>;

    async fn fetch_leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, SyncError>;

    async fn clear_all(&self) -> Result<(), SyncError>;

    /// Both lists, fetched concurrently. Fails if either fails.
    async fn fetch_snapshot(&self, limit: i64) -> Result<DashboardSnapshot, SyncError> {
        let (submissions, leaderboard) =
            tokio::try_join!(self.fetch_submissions(), self.fetch_leaderboard(limit))?;
        Ok(DashboardSnapshot {
            submissions,
            leaderboard,
            fetched_at: Utc::now(),
        })
    }
}

/// Talks to the server's JSON API.
#[derive(Clone)]
pub struct HttpDashboardSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDashboardSource {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, SyncError> {
        self.base_url
            .join(path)
            .map_err(|e| SyncError::Transport(format!("bad url {}: {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SyncError> {
        let res = self.client.get(url).send().await?;
        let res = check_status(res).await?;
        Ok(res.json::<T>().await?)
    }
}

#[async_trait]
impl DashboardSource for HttpDashboardSource {
    async fn fetch_submissions(&self) -> Result<Vec<SubmissionRecord>, SyncError> {
        self.get_json(self.endpoint("/api/submissions")?).await
    }

    async fn fetch_leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, SyncError> {
        let mut url = self.endpoint("/api/leaderboard")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        self.get_json(url).await
    }

    async fn clear_all(&self) -> Result<(), SyncError> {
        let res = self
            .client
            .post(self.endpoint("/api/clear")?)
            .send()
            .await?;
        check_status(res).await?;
        Ok(())
    }
}

/// Turns a non-success response into `SyncError::Status`, using the
/// server's `{"error": ...}` message when there is one.
async fn check_status(res: reqwest::Response) -> Result<reqwest::Response, SyncError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body);
    Err(SyncError::Status {
        status: status.as_u16(),
        message,
    })
}

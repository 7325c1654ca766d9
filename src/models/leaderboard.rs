// src/models/leaderboard.rs

use serde::{Deserialize, Serialize};

/// One row of the risk leaderboard. Recomputed on every read, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub subject_id: String,

    /// Full name, or the subject id when the name was left blank.
    pub display_name: String,

    pub email: String,

    pub score: i64,
}

/// Query parameters for the leaderboard.
/// `limit` is kept as text so that garbage falls back to the default
/// instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<String>,
}

// src/sync/error.rs

use std::fmt;

/// Failure of a single dashboard request. Never fatal to the poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Connection refused, timeout, DNS...
    Transport(String),

    /// The server answered with a non-success status.
    Status { status: u16, message: String },

    /// The body did not have the expected shape.
    Decode(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Transport(msg) => write!(f, "request failed: {}", msg),
            SyncError::Status { status, message } => write!(f, "HTTP {}: {}", status, message),
            SyncError::Decode(msg) => write!(f, "unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SyncError::Decode(err.to_string())
        } else {
            SyncError::Transport(err.to_string())
        }
    }
}

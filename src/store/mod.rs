// src/store/mod.rs

//! Storage abstractions for the two logical collections (submissions, actions).
//!
//! Every mutation is atomic with respect to readers: a `list_all` observes
//! either all or none of an `append`, and either the full pre-clear or the
//! empty post-clear collection.

use std::{fmt, sync::Arc};

use async_trait::async_trait;

use crate::{
    models::{
        action::{ActionEvent, NewAction},
        form::FormFieldSet,
        submission::SubmissionRecord,
    },
    services::export,
};

pub mod memory;
pub mod sqlite;

pub type SharedSubmissions = Arc<dyn SubmissionStore>;
pub type SharedActionLog = Arc<dyn ActionLog>;

#[derive(Debug)]
pub enum StoreError {
    /// The backing engine failed or is unreachable.
    Database(String),

    /// Schema migration failed at startup.
    Migration(String),

    /// A snapshot could not be serialized.
    Serialization(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(msg) => write!(f, "database error: {}", msg),
            StoreError::Migration(msg) => write!(f, "migration error: {}", msg),
            StoreError::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Migration(err.to_string())
    }
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// One finalized record per submission attempt.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Scores the form, assigns `id` and `created_at`, and persists the record.
    /// Every field is optional.
    async fn append(&self, form: FormFieldSet) -> Result<SubmissionRecord, StoreError>;

    /// All records in insertion order.
    async fn list_all(&self) -> Result<Vec<SubmissionRecord>, StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;

    /// CSV of the snapshot returned by a single `list_all`.
    async fn export_as_table(&self) -> Result<Vec<u8>, StoreError> {
        let records = self.list_all().await?;
        Ok(export::to_csv(&records)?)
    }
}

/// Append-only behavioral event log. Repeated events are kept as-is.
#[async_trait]
pub trait ActionLog: Send + Sync {
    async fn append(&self, action: NewAction) -> Result<ActionEvent, StoreError>;

    /// All events in insertion order.
    async fn list_all(&self) -> Result<Vec<ActionEvent>, StoreError>;

    /// Events of one subject, in insertion order.
    async fn list_for_subject(&self, subject_id: &str) -> Result<Vec<ActionEvent>, StoreError> {
        let events = self.list_all().await?;
        Ok(events
            .into_iter()
            .filter(|e| e.subject_id == subject_id)
            .collect())
    }

    async fn clear(&self) -> Result<(), StoreError>;
}

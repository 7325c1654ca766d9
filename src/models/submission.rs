// src/models/submission.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::form::FormFieldSet;

/// Represents the 'submissions' table.
/// One immutable row per completed form-fill attempt.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// Assigned by the store, never reused.
    pub id: i64,

    #[serde(flatten)]
    #[sqlx(flatten)]
    pub form: FormFieldSet,

    /// Risk score computed by the store, 0..=100.
    pub score: i64,

    pub filled_count: i64,

    pub created_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// The subject this record is attributed to. Empty when the student left
    /// the ID blank.
    pub fn subject_id(&self) -> &str {
        &self.form.student_id
    }
}

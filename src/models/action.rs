// src/models/action.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use sqlx::{FromRow, types::Json};

/// Subject identity used when an event arrives without one.
pub const UNKNOWN_SUBJECT: &str = "unknown_student";

/// Student opened an opportunity listing.
pub const VIEWED_OPPORTUNITY: &str = "viewed_opportunity";

/// Recorded by the server after every stored submission.
pub const PHISHING_TEST_SUBMIT: &str = "phishing_test_submit";

/// Represents the 'actions' table: one behavioral event.
/// Events are immutable and only ever appended.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEvent {
    pub id: i64,

    pub subject_id: String,

    /// Free-form tag, e.g. "viewed_opportunity".
    pub action: String,

    /// Opaque structured payload supplied by the client.
    pub metadata: Json<Value>,

    #[sqlx(rename = "created_at")]
    pub timestamp: DateTime<Utc>,
}

/// A normalized event waiting to be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAction {
    pub subject_id: String,
    pub action: String,
    pub metadata: Value,
}

impl NewAction {
    /// Substitutes `UNKNOWN_SUBJECT` for a blank subject and an empty object
    /// for missing metadata.
    pub fn new(subject_id: &str, action: &str, metadata: Value) -> Self {
        let subject_id = match subject_id.trim() {
            "" => UNKNOWN_SUBJECT.to_string(),
            s => s.to_string(),
        };
        let metadata = match metadata {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        Self {
            subject_id,
            action: action.trim().to_string(),
            metadata,
        }
    }
}

/// DTO for `POST /api/actions`.
/// Also accepts the legacy `studentID` / `meta` keys. A subject or action
/// that is null or not a string reads as empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordActionRequest {
    #[serde(default, alias = "studentID", deserialize_with = "string_or_empty")]
    pub subject_id: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub action: String,

    #[serde(default, alias = "meta")]
    pub metadata: Value,
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Query parameters for listing actions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActionsParams {
    #[serde(alias = "studentID")]
    pub subject_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActionAck {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

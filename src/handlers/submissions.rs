// src/handlers/submissions.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    clients::webhook::SubmissionNotice,
    error::AppError,
    models::{
        action::{NewAction, PHISHING_TEST_SUBMIT},
        form::{Field, FormFieldSet},
        submission::SubmissionRecord,
    },
    services::scoring,
    state::AppState,
    store::SharedSubmissions,
    utils::dispatch::record_action_detached,
};

/// Lists every stored submission in insertion order.
pub async fn list_submissions(
    State(store): State<SharedSubmissions>,
) -> Result<impl IntoResponse, AppError> {
    let records = store.list_all().await?;
    Ok(Json(records))
}

/// Stores a submission. The score is always computed here; whatever the
/// client claims is dropped during deserialization.
///
/// The follow-up submit action and the webhook run detached, so their
/// failure never affects the response.
pub async fn create_submission(
    State(state): State<AppState>,
    payload: Result<Json<FormFieldSet>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(form) = payload?;

    let record = state.submissions.append(form).await?;
    tracing::info!(
        id = record.id,
        score = record.score,
        filled = record.filled_count,
        "Submission stored"
    );

    record_action_detached(state.actions.clone(), submit_action(&record));

    if let Some(webhook) = &state.webhook {
        webhook.notify_detached(SubmissionNotice {
            full_name: record.form.full_name.clone(),
            email: record.form.email.clone(),
        });
    }

    Ok((StatusCode::CREATED, Json(record)))
}

/// Previews the score of a form without storing anything.
pub async fn preview_score(
    payload: Result<Json<FormFieldSet>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(form) = payload?;
    Ok(Json(scoring::score(&form)))
}

fn submit_action(record: &SubmissionRecord) -> NewAction {
    let empty_fields: Vec<&str> = record
        .form
        .empty_fields()
        .into_iter()
        .map(Field::key)
        .collect();

    NewAction::new(
        record.subject_id(),
        PHISHING_TEST_SUBMIT,
        json!({
            "source": "auto_on_submit",
            "score": record.score,
            "filledCount": record.filled_count,
            "emptyFields": empty_fields,
            "totalFields": Field::ALL.len(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::action::UNKNOWN_SUBJECT;

    #[test]
    fn submit_action_lists_empty_fields() {
        let form = FormFieldSet::default()
            .with(Field::FullName, "Ann")
            .with(Field::Email, "a@x.com");
        let record = SubmissionRecord {
            id: 1,
            form,
            score: 75,
            filled_count: 2,
            created_at: Utc::now(),
        };

        let action = submit_action(&record);
        assert_eq!(action.subject_id, UNKNOWN_SUBJECT);
        assert_eq!(action.action, PHISHING_TEST_SUBMIT);
        assert_eq!(action.metadata["source"], "auto_on_submit");
        assert_eq!(action.metadata["score"], 75);
        assert_eq!(action.metadata["totalFields"], 10);
        let empty = action.metadata["emptyFields"].as_array().unwrap();
        assert_eq!(empty.len(), 8);
        assert!(!empty.iter().any(|v| v == "email"));
        assert!(empty.iter().any(|v| v == "studentID"));
    }
}

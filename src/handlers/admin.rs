// src/handlers/admin.rs

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;

use crate::{
    error::AppError,
    services::export::{CSV_CONTENT_TYPE, CSV_FILENAME},
    state::AppState,
    store::{SharedSubmissions, StoreError},
};

/// Per-store result of a clear-all.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearStatus {
    Cleared,
    Failed,
}

impl From<&Result<(), StoreError>> for ClearStatus {
    fn from(result: &Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => ClearStatus::Cleared,
            Err(_) => ClearStatus::Failed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClearReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub submissions: ClearStatus,
    pub actions: ClearStatus,
}

/// Empties both collections.
/// Each store is cleared independently; a partial failure is reported as
/// such instead of being folded into a single success flag.
pub async fn clear_all(State(state): State<AppState>) -> impl IntoResponse {
    let (submissions, actions) = tokio::join!(state.submissions.clear(), state.actions.clear());

    if let Err(e) = &submissions {
        tracing::error!("Failed to clear submissions: {}", e);
    }
    if let Err(e) = &actions {
        tracing::error!("Failed to clear actions: {}", e);
    }

    let all_cleared = submissions.is_ok() && actions.is_ok();
    let report = ClearReport {
        message: all_cleared.then(|| "All data cleared".to_string()),
        error: (!all_cleared).then(|| "Failed to clear all data".to_string()),
        submissions: ClearStatus::from(&submissions),
        actions: ClearStatus::from(&actions),
    };

    if all_cleared {
        tracing::info!("All data cleared");
        (StatusCode::OK, Json(report))
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(report))
    }
}

/// Downloads every submission as CSV.
pub async fn export_csv(
    State(store): State<SharedSubmissions>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = store.export_as_table().await?;
    let disposition = format!("attachment; filename={}", CSV_FILENAME);

    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

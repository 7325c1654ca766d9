// src/handlers/actions.rs

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::action::{ActionAck, ListActionsParams, NewAction, RecordActionRequest},
    store::SharedActionLog,
    utils::dispatch::record_action_detached,
};

/// Accepts a behavioral event.
///
/// The write happens after the response is sent. An event without an
/// action tag is acknowledged and dropped.
pub async fn record_action(
    State(log): State<SharedActionLog>,
    payload: Result<Json<RecordActionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;

    if req.action.trim().is_empty() {
        tracing::debug!("Ignoring action without a tag");
        return Ok((
            StatusCode::ACCEPTED,
            Json(ActionAck {
                accepted: false,
                reason: Some("missing action"),
            }),
        ));
    }

    record_action_detached(log, NewAction::new(&req.subject_id, &req.action, req.metadata));

    Ok((
        StatusCode::ACCEPTED,
        Json(ActionAck {
            accepted: true,
            reason: None,
        }),
    ))
}

/// Lists events, optionally for one subject only.
pub async fn list_actions(
    State(log): State<SharedActionLog>,
    Query(params): Query<ListActionsParams>,
) -> Result<impl IntoResponse, AppError> {
    let events = match params.subject_id.as_deref().map(str::trim) {
        Some(subject) if !subject.is_empty() => log.list_for_subject(subject).await?,
        _ => log.list_all().await?,
    };
    Ok(Json(events))
}

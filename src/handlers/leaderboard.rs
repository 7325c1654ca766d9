// src/handlers/leaderboard.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::leaderboard::LeaderboardParams,
    services::leaderboard::{leaderboard, parse_limit},
    store::SharedSubmissions,
};

/// Riskiest students first, one entry per student.
pub async fn get_leaderboard(
    State(store): State<SharedSubmissions>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = parse_limit(params.limit.as_deref());
    let entries = leaderboard(store.as_ref(), limit).await?;
    Ok(Json(entries))
}

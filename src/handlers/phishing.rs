// src/handlers/phishing.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    clients::generator::GeneratorError, error::AppError, models::phishing::GenerateRequest,
    state::SharedGenerator,
};

/// Drafts a phishing email for the administrator's scenario.
pub async fn generate_phishing(
    State(generator): State<SharedGenerator>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err(AppError::BadRequest("Prompt is missing".to_string()));
    }

    let generator = generator.ok_or(GeneratorError::NotConfigured)?;
    let email = generator.generate(prompt).await?;
    Ok(Json(email))
}

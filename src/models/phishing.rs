// src/models/phishing.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO for asking the text generator for a phishing email.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    #[serde(default)]
    #[validate(length(max = 2000, message = "Prompt must be at most 2000 characters."))]
    pub prompt: String,
}

/// Generated email, as returned by the text-generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedEmail {
    pub subject: String,
    pub body: String,
}

// src/clients/generator.rs

//! Text-generation collaborator used to draft phishing emails for the
//! awareness exercise. Speaks the OpenAI-compatible chat.completions API.
//!
//! Calls log model name, latency and response size, never the API key.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::{config::GeneratorConfig, models::phishing::GeneratedEmail};

#[derive(Debug)]
pub enum GeneratorError {
    NotConfigured,
    Transport(String),
    Upstream { status: u16, message: String },
    Malformed(String),
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::NotConfigured => write!(f, "Text generation is not configured"),
            GeneratorError::Transport(msg) => {
                write!(f, "An error occurred during generation: {}", msg)
            }
            GeneratorError::Upstream { status, message } => {
                write!(f, "Generator HTTP {}: {}", status, message)
            }
            GeneratorError::Malformed(msg) => {
                write!(f, "Generator returned an unusable answer: {}", msg)
            }
        }
    }
}

impl std::error::Error for GeneratorError {}

/// Opaque text generator: prompt in, `{subject, body}` out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GeneratedEmail, GeneratorError>;
}

#[derive(Clone)]
pub struct ChatCompletionsGenerator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    phishing_link: String,
}

impl ChatCompletionsGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeneratorError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            model: config.model.clone(),
            phishing_link: config.phishing_link.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsGenerator {
    #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<GeneratedEmail, GeneratorError> {
        let url = format!("{}/chat/completions", self.base_url);
        let req = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessageReq {
                role: "user".into(),
                content: build_instruction(prompt, &self.phishing_link),
            }],
            temperature: 0.9,
        };

        let start = std::time::Instant::now();
        let res = self
            .client
            .post(&url)
            .header(USER_AGENT, "phishsim/0.1")
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&req)
            .send()
            .await
            .map_err(|e| GeneratorError::Transport(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            let message = extract_api_error(&body).unwrap_or(body);
            error!(elapsed = ?start.elapsed(), status, "Generator call failed");
            return Err(GeneratorError::Upstream { status, message });
        }

        let body: ChatCompletionResponse = res
            .json()
            .await
            .map_err(|e| GeneratorError::Malformed(e.to_string()))?;
        let text = body
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();
        info!(elapsed = ?start.elapsed(), response_len = text.len(), "Generator response received");

        parse_email(&text)
    }
}

/// Wraps the administrator's scenario in the generation instructions.
pub fn build_instruction(scenario: &str, phishing_link: &str) -> String {
    format!(
        "Act as a cybersecurity expert creating a realistic phishing simulation for an \
         educational awareness exercise.\n\
         Write a convincing phishing email for the scenario below.\n\
         The email MUST contain this link exactly as written: {link}\n\n\
         Scenario: \"{scenario}\"\n\n\
         Respond with ONLY a JSON object of the form \
         {{\"subject\": \"...\", \"body\": \"...\"}} and embed the link naturally in the body.",
        link = phishing_link,
        scenario = scenario,
    )
}

/// Parses the model answer, tolerating Markdown code fences and a leading
/// `json` language tag.
pub fn parse_email(raw: &str) -> Result<GeneratedEmail, GeneratorError> {
    let cleaned = raw.trim().replace('`', "");
    let cleaned = cleaned.trim();
    let cleaned = cleaned.strip_prefix("json").unwrap_or(cleaned).trim();

    let email: GeneratedEmail =
        serde_json::from_str(cleaned).map_err(|e| GeneratorError::Malformed(e.to_string()))?;
    if email.subject.trim().is_empty() && email.body.trim().is_empty() {
        return Err(GeneratorError::Malformed("empty subject and body".into()));
    }
    Ok(email)
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessageReq>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessageReq {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResp,
}

#[derive(Deserialize)]
struct ChatMessageResp {
    content: Option<String>,
}

/// Pulls `error.message` out of an API error body, if present.
fn extract_api_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct EWrap {
        error: EObj,
    }
    #[derive(Deserialize)]
    struct EObj {
        message: String,
    }
    serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

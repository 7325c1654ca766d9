// src/config.rs

use std::{env, fmt, net::SocketAddr, time::Duration};

use dotenvy::dotenv;
use url::Url;

const DEFAULT_GENERATOR_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const DEFAULT_GENERATOR_MODEL: &str = "gemini-2.5-pro";
const DEFAULT_PHISHING_LINK: &str = "https://adversarialattacksimulator.netlify.app";

#[derive(Debug)]
pub enum ConfigError {
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, reason } => write!(f, "invalid {}: {}", key, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings for the text-generation collaborator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_key: String,
    pub base_url: Url,
    pub model: String,
    pub phishing_link: Url,
    pub timeout_secs: u64,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub rust_log: String,
    pub log_dir: String,
    /// Empty means any origin.
    pub cors_origins: Vec<String>,
    /// `None` disables the generate endpoint.
    pub generator: Option<GeneratorConfig>,
    pub webhook_url: Option<Url>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://phishsim.db".to_string());

        let port: u16 = parse_var("PORT", 5000)?;
        let bind_addr = SocketAddr::from(([0, 0, 0, 0], port));

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let generator = match non_empty_var("GENERATOR_API_KEY") {
            Some(api_key) => Some(GeneratorConfig {
                api_key,
                base_url: parse_url(
                    "GENERATOR_BASE_URL",
                    non_empty_var("GENERATOR_BASE_URL")
                        .as_deref()
                        .unwrap_or(DEFAULT_GENERATOR_BASE_URL),
                )?,
                model: non_empty_var("GENERATOR_MODEL")
                    .unwrap_or_else(|| DEFAULT_GENERATOR_MODEL.to_string()),
                phishing_link: parse_url(
                    "PHISHING_LINK",
                    non_empty_var("PHISHING_LINK")
                        .as_deref()
                        .unwrap_or(DEFAULT_PHISHING_LINK),
                )?,
                timeout_secs: parse_var("GENERATOR_TIMEOUT_SECS", 30)?,
            }),
            None => None,
        };

        let webhook_url = non_empty_var("WEBHOOK_URL")
            .map(|raw| parse_url("WEBHOOK_URL", &raw))
            .transpose()?;

        Ok(Self {
            database_url,
            bind_addr,
            rust_log,
            log_dir,
            cors_origins,
            generator,
            webhook_url,
        })
    }
}

/// Configuration of the administrator display client.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub backend_url: Url,
    pub poll_interval: Duration,
    pub leaderboard_limit: i64,
    pub request_timeout: Duration,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let backend_url = parse_url(
            "BACKEND_URL",
            non_empty_var("BACKEND_URL")
                .as_deref()
                .unwrap_or("http://localhost:5000"),
        )?;

        let poll_secs: u64 = parse_var("POLL_INTERVAL_SECS", 5)?;
        if poll_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "POLL_INTERVAL_SECS",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            backend_url,
            poll_interval: Duration::from_secs(poll_secs),
            leaderboard_limit: parse_var("LEADERBOARD_LIMIT", 10)?,
            request_timeout: Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", 4)?),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match non_empty_var(key) {
        Some(raw) => raw.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_errors_name_the_key() {
        let err = parse_url("WEBHOOK_URL", "not a url").unwrap_err();
        assert!(err.to_string().starts_with("invalid WEBHOOK_URL"));
    }

    #[test]
    fn missing_numeric_var_uses_default() {
        let v: u16 = parse_var("PHISHSIM_TEST_SURELY_UNSET_VAR", 42).unwrap();
        assert_eq!(v, 42);
    }
}

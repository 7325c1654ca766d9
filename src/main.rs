// src/main.rs

use std::sync::Arc;

use phishsim::clients::{generator::ChatCompletionsGenerator, webhook::WebhookNotifier};
use phishsim::config::Config;
use phishsim::routes;
use phishsim::state::AppState;
use phishsim::store::sqlite::{self, SqliteActionLog, SqliteSubmissionStore};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment (.env included)
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "phishsim.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Connect and run migrations
    let pool = sqlite::connect(&config.database_url).await?;
    tracing::info!("Database ready at {}", config.database_url);

    let mut state = AppState::new(
        SqliteSubmissionStore::new(pool.clone()),
        SqliteActionLog::new(pool),
    );

    match &config.generator {
        Some(generator_config) => {
            let generator = ChatCompletionsGenerator::new(generator_config)?;
            tracing::info!("Phishing generation enabled (model {})", generator.model());
            state = state.with_generator(Arc::new(generator));
        }
        None => tracing::info!("GENERATOR_API_KEY not set, phishing generation disabled"),
    }

    if let Some(url) = &config.webhook_url {
        tracing::info!("Submission webhook enabled");
        state = state.with_webhook(WebhookNotifier::new(url.clone())?);
    }

    let app = routes::create_router(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

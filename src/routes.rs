// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{actions, admin, leaderboard, phishing, submissions},
    state::AppState,
};

/// Upper bound on request bodies.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Assembles the main application router.
///
/// * Mounts every endpoint under `/api`.
/// * Applies global middleware (Trace, CORS).
/// * Injects the shared stores and collaborators.
///
/// An empty `cors_origins` allows any origin.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let allow_origin = if cors_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route(
            "/submissions",
            get(submissions::list_submissions).post(submissions::create_submission),
        )
        .route("/score", post(submissions::preview_score))
        .route("/leaderboard", get(leaderboard::get_leaderboard))
        .route(
            "/actions",
            get(actions::list_actions).post(actions::record_action),
        )
        .route("/clear", post(admin::clear_all))
        .route("/export", get(admin::export_csv))
        .route("/generate-phishing", post(phishing::generate_phishing));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        // Global Middleware (outermost first)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

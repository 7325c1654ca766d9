// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    clients::{generator::TextGenerator, webhook::WebhookNotifier},
    store::{ActionLog, SharedActionLog, SharedSubmissions, SubmissionStore},
};

pub type SharedGenerator = Option<Arc<dyn TextGenerator>>;

/// Everything a request handler may touch. Stores are injected so that each
/// test can run against its own isolated instances.
#[derive(Clone)]
pub struct AppState {
    pub submissions: SharedSubmissions,
    pub actions: SharedActionLog,
    pub generator: SharedGenerator,
    pub webhook: Option<WebhookNotifier>,
}

impl AppState {
    pub fn new(
        submissions: impl SubmissionStore + 'static,
        actions: impl ActionLog + 'static,
    ) -> Self {
        Self {
            submissions: Arc::new(submissions),
            actions: Arc::new(actions),
            generator: None,
            webhook: None,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_webhook(mut self, webhook: WebhookNotifier) -> Self {
        self.webhook = Some(webhook);
        self
    }
}

impl FromRef<AppState> for SharedSubmissions {
    fn from_ref(state: &AppState) -> Self {
        state.submissions.clone()
    }
}

impl FromRef<AppState> for SharedActionLog {
    fn from_ref(state: &AppState) -> Self {
        state.actions.clone()
    }
}

impl FromRef<AppState> for SharedGenerator {
    fn from_ref(state: &AppState) -> Self {
        state.generator.clone()
    }
}

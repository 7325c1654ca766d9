// src/clients/webhook.rs

use std::time::Duration;

use serde::Serialize;
use url::Url;

/// Notifies an automation hook (e.g. an n8n workflow) about new submissions.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: Url,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionNotice {
    pub full_name: String,
    pub email: String,
}

impl WebhookNotifier {
    pub fn new(url: Url) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;
        Ok(Self { client, url })
    }

    pub async fn notify(&self, notice: &SubmissionNotice) -> Result<(), reqwest::Error> {
        self.client
            .post(self.url.clone())
            .json(notice)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Sends in the background; failures are logged and dropped.
    pub fn notify_detached(&self, notice: SubmissionNotice) {
        let notifier = self.clone();
        tokio::spawn(async move {
            match notifier.notify(&notice).await {
                Ok(()) => tracing::info!("Triggered submission webhook for {}", notice.email),
                Err(e) => tracing::warn!("Could not trigger submission webhook: {}", e),
            }
        });
    }
}

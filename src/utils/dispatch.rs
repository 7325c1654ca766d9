// src/utils/dispatch.rs

use tokio::task::JoinHandle;

use crate::{models::action::NewAction, store::SharedActionLog};

/// Appends an action without making the caller wait for it.
///
/// Failures are logged and dropped; the returned handle is only useful to
/// tests that need to wait for the write.
pub fn record_action_detached(log: SharedActionLog, action: NewAction) -> JoinHandle<()> {
    tokio::spawn(async move {
        let subject = action.subject_id.clone();
        let tag = action.action.clone();
        match log.append(action).await {
            Ok(event) => tracing::debug!(id = event.id, subject = %subject, tag = %tag, "Action recorded"),
            Err(e) => tracing::warn!(subject = %subject, tag = %tag, "Failed to record action: {}", e),
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::{
        models::action::UNKNOWN_SUBJECT,
        store::{ActionLog, memory::MemoryActionLog},
    };

    #[tokio::test]
    async fn detached_write_lands_in_the_log() {
        let log: SharedActionLog = Arc::new(MemoryActionLog::new());
        let handle = record_action_detached(
            log.clone(),
            NewAction::new("", "clicked_apply", json!({"value": "x"})),
        );
        handle.await.unwrap();

        let events = log.list_all().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].subject_id, UNKNOWN_SUBJECT);
    }
}

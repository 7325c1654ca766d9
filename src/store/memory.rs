// src/store/memory.rs

//! In-process stores. Used by tests and by deployments that accept losing
//! data on restart.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;

use super::{ActionLog, StoreError, SubmissionStore};
use crate::{
    models::{
        action::{ActionEvent, NewAction},
        form::FormFieldSet,
        submission::SubmissionRecord,
    },
    services::scoring,
};

struct Table<T> {
    last_id: i64,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            last_id: 0,
            rows: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct MemorySubmissionStore {
    table: RwLock<Table<SubmissionRecord>>,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn append(&self, form: FormFieldSet) -> Result<SubmissionRecord, StoreError> {
        let result = scoring::score(&form);
        let mut table = self.table.write().await;
        // Ids keep growing across clears.
        table.last_id += 1;
        let record = SubmissionRecord {
            id: table.last_id,
            form,
            score: result.score,
            filled_count: result.filled_count as i64,
            created_at: Utc::now(),
        };
        table.rows.push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<SubmissionRecord>, StoreError> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.table.write().await.rows.clear();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryActionLog {
    table: RwLock<Table<ActionEvent>>,
}

impl MemoryActionLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActionLog for MemoryActionLog {
    async fn append(&self, action: NewAction) -> Result<ActionEvent, StoreError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let event = ActionEvent {
            id: table.last_id,
            subject_id: action.subject_id,
            action: action.action,
            metadata: Json(action.metadata),
            timestamp: Utc::now(),
        };
        table.rows.push(event.clone());
        Ok(event)
    }

    async fn list_all(&self) -> Result<Vec<ActionEvent>, StoreError> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.table.write().await.rows.clear();
        Ok(())
    }
}

// src/store/sqlite.rs

//! Durable stores backed by SQLite through sqlx.

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    types::Json,
};

use super::{ActionLog, StoreError, SubmissionStore};
use crate::{
    models::{
        action::{ActionEvent, NewAction},
        form::FormFieldSet,
        submission::SubmissionRecord,
    },
    services::scoring,
};

const SUBMISSION_COLUMNS: &str = "id, full_name, student_id, college, course, address, mobile, \
     email, year, cgpa, opportunity, score, filled_count, created_at";

const ACTION_COLUMNS: &str = "id, subject_id, action, metadata, created_at";

/// Opens (creating if missing) the database and applies migrations.
///
/// In-memory URLs get a single, never-recycled connection so that every
/// query sees the same database.
pub async fn connect(database_url: &str) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
    };

    let pool = pool_options.connect_with(options).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied successfully.");

    Ok(pool)
}

#[derive(Clone)]
pub struct SqliteSubmissionStore {
    pool: SqlitePool,
}

impl SqliteSubmissionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for SqliteSubmissionStore {
    async fn append(&self, form: FormFieldSet) -> Result<SubmissionRecord, StoreError> {
        let result = scoring::score(&form);

        let sql = format!(
            r#"
            INSERT INTO submissions
                (full_name, student_id, college, course, address, mobile, email, year, cgpa, opportunity,
                 score, filled_count, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            SUBMISSION_COLUMNS
        );

        let record = sqlx::query_as::<_, SubmissionRecord>(&sql)
            .bind(&form.full_name)
            .bind(&form.student_id)
            .bind(&form.college)
            .bind(&form.course)
            .bind(&form.address)
            .bind(&form.mobile)
            .bind(&form.email)
            .bind(&form.year)
            .bind(&form.cgpa)
            .bind(&form.opportunity)
            .bind(result.score)
            .bind(result.filled_count as i64)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert submission: {:?}", e);
                StoreError::from(e)
            })?;

        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<SubmissionRecord>, StoreError> {
        let sql = format!("SELECT {} FROM submissions ORDER BY id ASC", SUBMISSION_COLUMNS);
        let records = sqlx::query_as::<_, SubmissionRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM submissions")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct SqliteActionLog {
    pool: SqlitePool,
}

impl SqliteActionLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActionLog for SqliteActionLog {
    async fn append(&self, action: NewAction) -> Result<ActionEvent, StoreError> {
        let sql = format!(
            "INSERT INTO actions (subject_id, action, metadata, created_at) VALUES (?, ?, ?, ?) RETURNING {}",
            ACTION_COLUMNS
        );

        let event = sqlx::query_as::<_, ActionEvent>(&sql)
            .bind(&action.subject_id)
            .bind(&action.action)
            .bind(Json(&action.metadata))
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        Ok(event)
    }

    async fn list_all(&self) -> Result<Vec<ActionEvent>, StoreError> {
        let sql = format!("SELECT {} FROM actions ORDER BY id ASC", ACTION_COLUMNS);
        let events = sqlx::query_as::<_, ActionEvent>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn list_for_subject(&self, subject_id: &str) -> Result<Vec<ActionEvent>, StoreError> {
        let sql = format!(
            "SELECT {} FROM actions WHERE subject_id = ? ORDER BY id ASC",
            ACTION_COLUMNS
        );
        let events = sqlx::query_as::<_, ActionEvent>(&sql)
            .bind(subject_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM actions").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::{action::PHISHING_TEST_SUBMIT, form::Field};

    async fn pool() -> SqlitePool {
        connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn submission_round_trip_through_sql() {
        let store = SqliteSubmissionStore::new(pool().await);
        let form = FormFieldSet::default()
            .with(Field::FullName, "Ann")
            .with(Field::StudentId, "S1")
            .with(Field::Opportunity, "Google STEP");

        let created = store.append(form.clone()).await.unwrap();
        assert_eq!(created.form, form);
        assert_eq!(created.score, 60);
        assert_eq!(created.filled_count, 3);

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);
        assert_eq!(all[0].score, 60);
    }

    #[tokio::test]
    async fn ids_survive_a_clear() {
        let store = SqliteSubmissionStore::new(pool().await);
        let first = store.append(FormFieldSet::default()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
        let second = store.append(FormFieldSet::default()).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn action_log_keeps_order_and_metadata() {
        let log = SqliteActionLog::new(pool().await);
        log.append(NewAction::new("S1", "viewed_opportunity", json!({"value": "A"})))
            .await
            .unwrap();
        log.append(NewAction::new("S2", PHISHING_TEST_SUBMIT, json!({"score": 40})))
            .await
            .unwrap();
        log.append(NewAction::new("S1", "viewed_opportunity", json!({"value": "A"})))
            .await
            .unwrap();

        let all = log.list_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].metadata.0["score"], 40);

        let s1 = log.list_for_subject("S1").await.unwrap();
        assert_eq!(s1.len(), 2);
        assert!(s1[0].id < s1[1].id);

        log.clear().await.unwrap();
        assert!(log.list_all().await.unwrap().is_empty());
    }
}

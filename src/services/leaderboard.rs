// src/services/leaderboard.rs

use std::collections::HashMap;

use crate::{
    models::{leaderboard::LeaderboardEntry, submission::SubmissionRecord},
    store::{StoreError, SubmissionStore},
};

/// Used when the caller omits `limit` or sends something unparsable.
pub const DEFAULT_LIMIT: i64 = 10;

/// Interprets the raw `limit` query value.
pub fn parse_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_LIMIT)
}

/// Ranks subjects by the score of their most recent submission.
///
/// * Records with an empty studentID are skipped.
/// * The latest record per studentID wins (`created_at`, then `id`).
/// * Lowest score first; ties broken by subject id ascending.
pub fn rank(records: &[SubmissionRecord], limit: i64) -> Vec<LeaderboardEntry> {
    if limit <= 0 {
        return Vec::new();
    }

    let mut latest: HashMap<&str, &SubmissionRecord> = HashMap::new();
    for record in records {
        let subject = record.subject_id();
        if subject.is_empty() {
            continue;
        }
        latest
            .entry(subject)
            .and_modify(|current| {
                if (record.created_at, record.id) > (current.created_at, current.id) {
                    *current = record;
                }
            })
            .or_insert(record);
    }

    let mut entries: Vec<LeaderboardEntry> = latest
        .into_iter()
        .map(|(subject, record)| LeaderboardEntry {
            subject_id: subject.to_string(),
            display_name: if record.form.full_name.is_empty() {
                subject.to_string()
            } else {
                record.form.full_name.clone()
            },
            email: record.form.email.clone(),
            score: record.score,
        })
        .collect();

    entries.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.subject_id.cmp(&b.subject_id)));
    entries.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    entries
}

/// Reads the current store contents and ranks them. Holds no state between calls.
pub async fn leaderboard(
    store: &dyn SubmissionStore,
    limit: i64,
) -> Result<Vec<LeaderboardEntry>, StoreError> {
    if limit <= 0 {
        return Ok(Vec::new());
    }
    let records = store.list_all().await?;
    Ok(rank(&records, limit))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::models::form::{Field, FormFieldSet};

    fn record(id: i64, student: &str, name: &str, score: i64, minutes: i64) -> SubmissionRecord {
        SubmissionRecord {
            id,
            form: FormFieldSet::default()
                .with(Field::StudentId, student)
                .with(Field::FullName, name)
                .with(Field::Email, format!("{}@uni.test", student)),
            score,
            filled_count: 0,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    #[test]
    fn empty_input_gives_empty_board() {
        assert!(rank(&[], 10).is_empty());
    }

    #[test]
    fn non_positive_limit_gives_empty_board() {
        let records = vec![record(1, "S1", "A", 50, 0)];
        assert!(rank(&records, 0).is_empty());
        assert!(rank(&records, -4).is_empty());
    }

    #[test]
    fn latest_submission_per_subject_wins() {
        let records = vec![record(1, "S1", "Ann", 80, 0), record(2, "S1", "Ann", 40, 1)];
        let board = rank(&records, 10);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].score, 40);
    }

    #[test]
    fn latest_is_by_time_not_by_position() {
        let records = vec![record(2, "S1", "Ann", 40, 5), record(1, "S1", "Ann", 80, 0)];
        assert_eq!(rank(&records, 10)[0].score, 40);
    }

    #[test]
    fn equal_timestamps_fall_back_to_id() {
        let records = vec![record(7, "S1", "Ann", 10, 0), record(3, "S1", "Ann", 90, 0)];
        assert_eq!(rank(&records, 10)[0].score, 10);
    }

    #[test]
    fn sorted_by_score_then_subject() {
        let records = vec![
            record(1, "S3", "C", 55, 0),
            record(2, "S2", "B", 20, 0),
            record(3, "S1", "A", 55, 0),
            record(4, "S4", "D", 90, 0),
        ];
        let ids: Vec<_> = rank(&records, 10).into_iter().map(|e| e.subject_id).collect();
        assert_eq!(ids, vec!["S2", "S1", "S3", "S4"]);
    }

    #[test]
    fn truncates_to_limit() {
        let records: Vec<_> = (0..8)
            .map(|i| record(i, &format!("S{}", i), "x", i * 10, 0))
            .collect();
        let board = rank(&records, 3);
        assert_eq!(board.len(), 3);
        assert_eq!(board[0].subject_id, "S0");
    }

    #[test]
    fn blank_student_id_is_excluded() {
        let records = vec![record(1, "", "Ghost", 0, 0), record(2, "S1", "Ann", 70, 0)];
        let board = rank(&records, 10);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].subject_id, "S1");
    }

    #[test]
    fn display_name_falls_back_to_subject() {
        let records = vec![record(1, "S1", "", 70, 0)];
        assert_eq!(rank(&records, 10)[0].display_name, "S1");
    }

    #[test]
    fn limit_parsing() {
        assert_eq!(parse_limit(None), DEFAULT_LIMIT);
        assert_eq!(parse_limit(Some("abc")), DEFAULT_LIMIT);
        assert_eq!(parse_limit(Some("3")), 3);
        assert_eq!(parse_limit(Some("-1")), -1);
    }
}

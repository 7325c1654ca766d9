// src/services/export.rs

use chrono::SecondsFormat;

use crate::models::{form::Field, submission::SubmissionRecord};

pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const CSV_FILENAME: &str = "phishing_simulation_data.csv";

/// Serializes a snapshot of submission records as CSV.
///
/// Header: every form field in form order, then score, filledCount, createdAt.
/// Rows follow the order of `records`.
pub fn to_csv(records: &[SubmissionRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = Field::ALL.iter().map(|f| f.key()).collect();
    header.extend(["score", "filledCount", "createdAt"]);
    wtr.write_record(&header)?;

    for record in records {
        let mut row: Vec<String> = Field::ALL
            .iter()
            .map(|f| record.form.value(*f).to_string())
            .collect();
        row.push(record.score.to_string());
        row.push(record.filled_count.to_string());
        row.push(record.created_at.to_rfc3339_opts(SecondsFormat::Secs, true));
        wtr.write_record(&row)?;
    }

    wtr.into_inner().map_err(|e| e.into_error().into())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::form::FormFieldSet;

    #[test]
    fn empty_snapshot_is_header_only() {
        let out = String::from_utf8(to_csv(&[]).unwrap()).unwrap();
        assert_eq!(
            out,
            "fullName,studentID,college,course,address,mobile,email,year,cgpa,opportunity,score,filledCount,createdAt\n"
        );
    }

    #[test]
    fn rows_are_quoted_when_needed() {
        let record = SubmissionRecord {
            id: 1,
            form: FormFieldSet::default()
                .with(Field::FullName, "Doe, Jane")
                .with(Field::Address, "12 \"Elm\" St"),
            score: 85,
            filled_count: 2,
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        };
        let out = String::from_utf8(to_csv(&[record]).unwrap()).unwrap();
        let row = out.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"Doe, Jane\",,,,\"12 \"\"Elm\"\" St\",,,,,,85,2,2025-01-02T03:04:05Z"
        );
    }
}

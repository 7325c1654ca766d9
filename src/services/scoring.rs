// src/services/scoring.rs

use serde::Serialize;

use crate::models::form::{Field, FormFieldSet};

/// Score of a form on which nothing was disclosed.
pub const MAX_SCORE: i64 = 100;

/// Points deducted for each disclosed field, in reporting order.
pub const FIELD_WEIGHTS: [(Field, i64); 10] = [
    (Field::FullName, 10),
    (Field::StudentId, 15),
    (Field::College, 5),
    (Field::Course, 5),
    (Field::Address, 5),
    (Field::Mobile, 15),
    (Field::Email, 15),
    (Field::Year, 5),
    (Field::Cgpa, 10),
    (Field::Opportunity, 15),
];

/// Outcome of scoring one form snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// 100 = nothing disclosed, 0 = everything disclosed.
    pub score: i64,
    pub filled_fields: Vec<Field>,
    pub filled_count: usize,
}

/// Converts a form snapshot into a risk score.
///
/// Total over every `FormFieldSet` and free of side effects. The result is
/// clamped to `0..=MAX_SCORE` regardless of what the weight table sums to.
pub fn score(form: &FormFieldSet) -> ScoreResult {
    let mut score = MAX_SCORE;
    let mut filled_fields = Vec::new();

    for (field, weight) in FIELD_WEIGHTS {
        if form.is_filled(field) {
            score -= weight;
            filled_fields.push(field);
        }
    }

    ScoreResult {
        score: score.clamp(0, MAX_SCORE),
        filled_count: filled_fields.len(),
        filled_fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn everything() -> FormFieldSet {
        Field::ALL
            .iter()
            .fold(FormFieldSet::default(), |f, field| f.with(*field, "x"))
    }

    #[test]
    fn empty_form_scores_full_marks() {
        let r = score(&FormFieldSet::default());
        assert_eq!(r.score, 100);
        assert!(r.filled_fields.is_empty());
        assert_eq!(r.filled_count, 0);
    }

    #[test]
    fn full_form_scores_zero() {
        let r = score(&everything());
        assert_eq!(r.score, 0);
        assert_eq!(r.filled_count, 10);
        assert_eq!(r.filled_fields, Field::ALL.to_vec());
    }

    #[test]
    fn weights_cover_every_field_once_and_sum_to_max() {
        let total: i64 = FIELD_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert_eq!(total, MAX_SCORE);
        for field in Field::ALL {
            assert_eq!(FIELD_WEIGHTS.iter().filter(|(f, _)| *f == field).count(), 1);
        }
    }

    #[test]
    fn name_and_email_only() {
        let form = FormFieldSet::default()
            .with(Field::FullName, "Ann")
            .with(Field::StudentId, "")
            .with(Field::Email, "a@x.com");
        let r = score(&form);
        assert_eq!(r.filled_fields, vec![Field::FullName, Field::Email]);
        assert_eq!(r.filled_count, 2);
        assert_eq!(r.score, 75);
    }

    #[test]
    fn whitespace_values_do_not_count() {
        let form = FormFieldSet {
            mobile: "   ".into(),
            cgpa: "\t".into(),
            ..Default::default()
        };
        assert_eq!(score(&form).score, 100);
    }

    #[test]
    fn score_matches_weight_sum_for_every_single_field() {
        for (field, weight) in FIELD_WEIGHTS {
            let r = score(&FormFieldSet::default().with(field, "v"));
            assert_eq!(r.score, MAX_SCORE - weight, "field {:?}", field);
            assert_eq!(r.filled_fields, vec![field]);
        }
    }

    #[test]
    fn filling_more_never_raises_the_score() {
        let mut form = FormFieldSet::default();
        let mut previous = score(&form).score;
        for field in Field::ALL {
            form = form.with(field, "filled");
            let current = score(&form).score;
            assert!(current <= previous);
            assert!((0..=MAX_SCORE).contains(&current));
            previous = current;
        }
    }

    #[test]
    fn serializes_field_names_as_form_keys() {
        let r = score(&FormFieldSet::default().with(Field::StudentId, "S"));
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["filledFields"][0], "studentID");
        assert_eq!(v["filledCount"], 1);
        assert_eq!(v["score"], 85);
    }
}

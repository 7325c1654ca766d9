// src/models/form.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// The closed set of fields on the opportunity application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    #[serde(rename = "studentID")]
    StudentId,
    College,
    Course,
    Address,
    Mobile,
    Email,
    Year,
    Cgpa,
    Opportunity,
}

impl Field {
    /// Form order, as presented to the student.
    pub const ALL: [Field; 10] = [
        Field::FullName,
        Field::StudentId,
        Field::College,
        Field::Course,
        Field::Address,
        Field::Mobile,
        Field::Email,
        Field::Year,
        Field::Cgpa,
        Field::Opportunity,
    ];

    /// JSON key of the field.
    pub fn key(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::StudentId => "studentID",
            Field::College => "college",
            Field::Course => "course",
            Field::Address => "address",
            Field::Mobile => "mobile",
            Field::Email => "email",
            Field::Year => "year",
            Field::Cgpa => "cgpa",
            Field::Opportunity => "opportunity",
        }
    }
}

/// Snapshot of a (possibly partially) filled application form.
///
/// Deserialization only accepts a JSON object. Unknown keys (including a
/// client-computed `score` or `filledCount`) are dropped, non-string values
/// are treated as empty and string values are trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(from = "Map<String, Value>")]
pub struct FormFieldSet {
    #[serde(rename = "fullName")]
    pub full_name: String,

    #[serde(rename = "studentID")]
    pub student_id: String,

    pub college: String,

    pub course: String,

    pub address: String,

    pub mobile: String,

    pub email: String,

    pub year: String,

    pub cgpa: String,

    pub opportunity: String,
}

impl FormFieldSet {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::StudentId => &self.student_id,
            Field::College => &self.college,
            Field::Course => &self.course,
            Field::Address => &self.address,
            Field::Mobile => &self.mobile,
            Field::Email => &self.email,
            Field::Year => &self.year,
            Field::Cgpa => &self.cgpa,
            Field::Opportunity => &self.opportunity,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FullName => &mut self.full_name,
            Field::StudentId => &mut self.student_id,
            Field::College => &mut self.college,
            Field::Course => &mut self.course,
            Field::Address => &mut self.address,
            Field::Mobile => &mut self.mobile,
            Field::Email => &mut self.email,
            Field::Year => &mut self.year,
            Field::Cgpa => &mut self.cgpa,
            Field::Opportunity => &mut self.opportunity,
        }
    }

    /// A field is filled iff its value is non-empty after trimming.
    pub fn is_filled(&self, field: Field) -> bool {
        !self.value(field).trim().is_empty()
    }

    /// Builder-style setter, mostly useful in tests and seeding.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        *self.value_mut(field) = value.into().trim().to_string();
        self
    }

    /// Fields left blank, in form order.
    pub fn empty_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| !self.is_filled(*f))
            .collect()
    }
}

impl From<Map<String, Value>> for FormFieldSet {
    fn from(map: Map<String, Value>) -> Self {
        let mut form = FormFieldSet::default();
        for field in Field::ALL {
            if let Some(Value::String(s)) = map.get(field.key()) {
                *form.value_mut(field) = s.trim().to_string();
            }
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_partial_object_and_trims() {
        let form: FormFieldSet =
            serde_json::from_value(json!({"fullName": "  Ann ", "email": "a@x.com"})).unwrap();
        assert_eq!(form.full_name, "Ann");
        assert_eq!(form.email, "a@x.com");
        assert_eq!(form.student_id, "");
    }

    #[test]
    fn ignores_unknown_keys_and_non_string_values() {
        let form: FormFieldSet = serde_json::from_value(json!({
            "cgpa": 9.1,
            "mobile": null,
            "score": 0,
            "filledCount": 10,
            "studentID": "S-1"
        }))
        .unwrap();
        assert_eq!(form.cgpa, "");
        assert_eq!(form.mobile, "");
        assert_eq!(form.student_id, "S-1");
    }

    #[test]
    fn rejects_non_object_bodies() {
        assert!(serde_json::from_value::<FormFieldSet>(json!(["Ann", "S-1"])).is_err());
        assert!(serde_json::from_value::<FormFieldSet>(json!("Ann")).is_err());
    }

    #[test]
    fn serializes_with_form_keys() {
        let form = FormFieldSet::default().with(Field::StudentId, "S-9");
        let v = serde_json::to_value(&form).unwrap();
        assert_eq!(v["studentID"], "S-9");
        assert_eq!(v["fullName"], "");
    }

    #[test]
    fn whitespace_only_is_not_filled() {
        let form = FormFieldSet {
            address: "   ".into(),
            ..Default::default()
        };
        assert!(!form.is_filled(Field::Address));
        assert_eq!(form.empty_fields(), Field::ALL.to_vec());
    }
}

//! The personal-data ruleset
//!
//! Every field of a [`Submission`] is described by a [`FieldRule`]: the field
//! name plus one function that checks the raw JSON value and returns its
//! normalized form. [`validate`] evaluates every rule eagerly in check order
//! (first_name, last_name, email, phone, age), collects all failures, and
//! returns a [`Validation`].

use serde_json::Value;
use validator_shared::{FieldError, FieldErrors, Submission, ValidatedRecord};

use super::sanitizers::{capitalize_name, normalize_phone};
use super::validators::{
    expect_integer, expect_string, validate_age, validate_email, validate_min_length,
    validate_phone, FIELD_REQUIRED, MIN_NAME_LENGTH,
};

// ─────────────────────────────────────────────────────────────────────────────
// Rule table
// ─────────────────────────────────────────────────────────────────────────────

pub const FIRST_NAME: FieldRule<String> = FieldRule {
    field: "first_name",
    check: person_name,
};

pub const LAST_NAME: FieldRule<String> = FieldRule {
    field: "last_name",
    check: person_name,
};

pub const EMAIL: FieldRule<String> = FieldRule {
    field: "email",
    check: email_address,
};

pub const PHONE: FieldRule<String> = FieldRule {
    field: "phone",
    check: phone_number,
};

pub const AGE: FieldRule<i64> = FieldRule {
    field: "age",
    check: age_years,
};

/// One field's constraint and normalization
pub struct FieldRule<T> {
    pub field: &'static str,
    pub check: fn(&Value) -> Result<T, String>,
}

impl<T> FieldRule<T> {
    /// Evaluate a required field: absence is its own failure
    pub fn require(&self, raw: Option<&Value>) -> Result<T, FieldError> {
        match raw {
            Some(value) => self.apply(value),
            None => Err(FieldError::new(self.field, FIELD_REQUIRED)),
        }
    }

    /// Evaluate an optional field: absence is valid and yields `None`
    pub fn optional(&self, raw: Option<&Value>) -> Result<Option<T>, FieldError> {
        raw.map(|value| self.apply(value)).transpose()
    }

    fn apply(&self, value: &Value) -> Result<T, FieldError> {
        (self.check)(value).map_err(|message| FieldError::new(self.field, message))
    }
}

fn person_name(value: &Value) -> Result<String, String> {
    let raw = expect_string(value)?;
    validate_min_length(raw, MIN_NAME_LENGTH)?;
    Ok(capitalize_name(raw))
}

fn email_address(value: &Value) -> Result<String, String> {
    let raw = expect_string(value)?;
    validate_email(raw)?;
    Ok(raw.to_string())
}

fn phone_number(value: &Value) -> Result<String, String> {
    let phone = normalize_phone(expect_string(value)?);
    validate_phone(&phone)?;
    Ok(phone)
}

fn age_years(value: &Value) -> Result<i64, String> {
    let age = expect_integer(value)?;
    validate_age(age)?;
    Ok(age)
}

// ─────────────────────────────────────────────────────────────────────────────
// Evaluation
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of running the ruleset over one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid(ValidatedRecord),
    /// Always holds at least one entry
    Invalid(FieldErrors),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    pub fn into_result(self) -> Result<ValidatedRecord, FieldErrors> {
        match self {
            Validation::Valid(record) => Ok(record),
            Validation::Invalid(errors) => Err(errors),
        }
    }
}

/// Validate and normalize a submission.
///
/// Never short-circuits: every field is checked and every failure reported.
pub fn validate(submission: &Submission) -> Validation {
    let first_name = FIRST_NAME.require(submission.first_name.as_ref());
    let last_name = LAST_NAME.require(submission.last_name.as_ref());
    let email = EMAIL.require(submission.email.as_ref());
    let phone = PHONE.optional(submission.phone.as_ref());
    let age = AGE.optional(submission.age.as_ref());

    match (first_name, last_name, email, phone, age) {
        (Ok(first_name), Ok(last_name), Ok(email), Ok(phone), Ok(age)) => {
            Validation::Valid(ValidatedRecord {
                first_name,
                last_name,
                email,
                phone,
                age,
            })
        }
        (first_name, last_name, email, phone, age) => Validation::Invalid(
            [
                first_name.err(),
                last_name.err(),
                email.err(),
                phone.err(),
                age.err(),
            ]
            .into_iter()
            .flatten()
            .collect(),
        ),
    }
}

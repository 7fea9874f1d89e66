//! Field validators for personal-data submissions
//!
//! Each validator checks one constraint and returns the human-readable
//! failure message on error. Messages are part of the wire contract.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Simplified local@domain.tld pattern. Rejects some valid addresses and
/// accepts some invalid ones; callers depend on exactly this behaviour.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

pub const FIELD_REQUIRED: &str = "Field required";
pub const NOT_A_STRING: &str = "Input should be a valid string";
pub const NOT_AN_INTEGER: &str = "Input should be a valid integer";
pub const NAME_TOO_SHORT: &str = "Must have at least 2 characters";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const PHONE_NOT_DIGITS: &str = "Phone must contain only digits";
pub const PHONE_TOO_SHORT: &str = "Phone must have at least 7 digits";
pub const AGE_OUT_OF_RANGE: &str = "Age must be between 0 and 120";

pub const MIN_NAME_LENGTH: usize = 2;
pub const MIN_PHONE_DIGITS: usize = 7;
pub const MIN_AGE: i64 = 0;
pub const MAX_AGE: i64 = 120;

/// Require a JSON string
pub fn expect_string(value: &Value) -> Result<&str, String> {
    value.as_str().ok_or_else(|| NOT_A_STRING.to_string())
}

/// Coerce a JSON value to an integer.
///
/// Accepts integers, integral floats (`30.0`), booleans (as 0 or 1) and
/// strings holding a whole number (`" 30 "`, `"30.00"`). Values beyond the
/// i64 range saturate and fail later range checks.
pub fn expect_integer(value: &Value) -> Result<i64, String> {
    let coerced = match value {
        Value::Number(n) => n.as_i64().or_else(|| match n.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
            _ => None,
        }),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => parse_integer_text(s),
        _ => None,
    };
    coerced.ok_or_else(|| NOT_AN_INTEGER.to_string())
}

fn parse_integer_text(text: &str) -> Option<i64> {
    let text = text.trim();
    let whole = match text.split_once('.') {
        Some((whole, zeros)) if !zeros.is_empty() && zeros.bytes().all(|b| b == b'0') => whole,
        Some(_) => return None,
        None => text,
    };
    let digits = whole.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(whole);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let saturated = if whole.starts_with('-') { i64::MIN } else { i64::MAX };
    Some(whole.parse().unwrap_or(saturated))
}

/// Unicode decimal digit (general category Nd), e.g. `7` or full-width `７`
fn is_decimal_digit(c: char) -> bool {
    c.general_category() == GeneralCategory::DecimalNumber
}

/// Validate that a name has at least `min` characters once trimmed
pub fn validate_min_length(value: &str, min: usize) -> Result<(), String> {
    if value.trim().chars().count() < min {
        return Err(NAME_TOO_SHORT.to_string());
    }
    Ok(())
}

/// Validate email format against the simplified pattern. The value is not
/// trimmed first.
pub fn validate_email(email: &str) -> Result<(), String> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(EMAIL_INVALID.to_string());
    }
    Ok(())
}

/// Validate an already trimmed phone number.
/// The digit check runs before the length check.
pub fn validate_phone(phone: &str) -> Result<(), String> {
    if phone.is_empty() || !phone.chars().all(is_decimal_digit) {
        return Err(PHONE_NOT_DIGITS.to_string());
    }
    if phone.chars().count() < MIN_PHONE_DIGITS {
        return Err(PHONE_TOO_SHORT.to_string());
    }
    Ok(())
}

/// Validate age within the closed range [0, 120]
pub fn validate_age(age: i64) -> Result<(), String> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(AGE_OUT_OF_RANGE.to_string());
    }
    Ok(())
}

use serde_json::{json, Value};
use validator_api::validation::{
    capitalize_name, validate, Validation, AGE_OUT_OF_RANGE, NAME_TOO_SHORT, PHONE_NOT_DIGITS,
    PHONE_TOO_SHORT,
};
use validator_shared::{FieldErrors, Submission};

fn base() -> Value {
    json!({
        "first_name": "juan",
        "last_name": "perez",
        "email": "juan@example.com"
    })
}

fn with(field: &str, value: Value) -> Submission {
    let mut body = base();
    body[field] = value;
    serde_json::from_value(body).unwrap()
}

fn errors_for(submission: &Submission) -> FieldErrors {
    match validate(submission) {
        Validation::Invalid(errors) => errors,
        Validation::Valid(record) => panic!("expected failure, got {record:?}"),
    }
}

#[test]
fn names_shorter_than_two_characters_fail() {
    for field in ["first_name", "last_name"] {
        for short in ["", " ", "a", "  b  ", "\t\n", "é"] {
            let errors = errors_for(&with(field, json!(short)));
            assert_eq!(errors.fields(), vec![field], "{field} = {short:?}");
            assert_eq!(errors.get(field), Some(NAME_TOO_SHORT));
        }
    }
}

#[test]
fn name_normalization_is_idempotent() {
    for raw in ["juan", "JUAN", "jUaN", "  juan ", "Juan"] {
        let record = validate(&with("first_name", json!(raw)))
            .into_result()
            .unwrap();
        assert_eq!(record.first_name, "Juan");
        assert_eq!(capitalize_name(&record.first_name), record.first_name);
    }
}

#[test]
fn phones_with_any_non_digit_fail_regardless_of_length() {
    for phone in ["12345678901x", "123 4567", "(555)1234567", "+15551234567", "²³⁴⁵⁶⁷⁸", "a"] {
        let errors = errors_for(&with("phone", json!(phone)));
        assert_eq!(errors.get("phone"), Some(PHONE_NOT_DIGITS), "phone = {phone:?}");
    }
}

#[test]
fn all_digit_phones_shorter_than_seven_fail() {
    for len in 1..7 {
        let phone = "9".repeat(len);
        let errors = errors_for(&with("phone", json!(phone)));
        assert_eq!(errors.get("phone"), Some(PHONE_TOO_SHORT), "len {len}");
    }
    assert!(validate(&with("phone", json!("9999999"))).is_valid());
}

#[test]
fn ages_outside_range_fail_and_boundaries_pass() {
    for age in [-100, -1, 121, 200, i64::MAX] {
        let errors = errors_for(&with("age", json!(age)));
        assert_eq!(errors.get("age"), Some(AGE_OUT_OF_RANGE), "age {age}");
    }
    for age in [0, 1, 60, 119, 120] {
        let record = validate(&with("age", json!(age))).into_result().unwrap();
        assert_eq!(record.age, Some(age));
    }
}

#[test]
fn each_missing_required_field_is_reported() {
    for field in ["first_name", "last_name", "email"] {
        let mut body = base();
        body.as_object_mut().unwrap().remove(field);
        let submission: Submission = serde_json::from_value(body).unwrap();
        let errors = errors_for(&submission);
        assert_eq!(errors.fields(), vec![field]);
    }
}

#[test]
fn unicode_decimal_digit_phones_pass() {
    for phone in ["１２３４５６７", "٠١٢٣٤٥٦٧", " ０１２３４５６７８ "] {
        let record = validate(&with("phone", json!(phone)))
            .into_result()
            .unwrap();
        assert_eq!(record.phone.as_deref(), Some(phone.trim()));
    }
}

#[test]
fn numeric_age_text_and_bools_are_coerced() {
    for (raw, expected) in [(json!("30"), 30), (json!(" 120 "), 120), (json!(true), 1), (json!(false), 0)] {
        let record = validate(&with("age", raw.clone()))
            .into_result()
            .unwrap();
        assert_eq!(record.age, Some(expected), "age = {raw}");
    }
    let errors = errors_for(&with("age", json!("121")));
    assert_eq!(errors.get("age"), Some(AGE_OUT_OF_RANGE));
}

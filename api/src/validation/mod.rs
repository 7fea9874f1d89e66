//! Personal-data validation
//!
//! # Overview
//!
//! 1. **Validators** - single-constraint checks returning the wire message
//! 2. **Sanitizers** - normalizers applied to values that passed
//! 3. **Rules** - the ordered field table and [`validate`], which returns a
//!    [`Validation`]: either a normalized record or every field error
//! 4. **Extractors** - `SubmissionJson`, which decodes request bodies and
//!    maps parse failures to 422 responses
//!
//! # Error Response
//!
//! ```json
//! {
//!   "valid": false,
//!   "message": "The submitted data contains validation errors",
//!   "errors": {
//!     "first_name": "Must have at least 2 characters",
//!     "phone": "Phone must contain only digits"
//!   },
//!   "timestamp": "2026-02-20T10:30:00.000Z"
//! }
//! ```

pub mod extractors;
pub mod rules;
pub mod sanitizers;
pub mod validators;

pub use extractors::{SubmissionJson, BODY_FIELD};
pub use rules::{validate, FieldRule, Validation};
pub use sanitizers::{capitalize_name, normalize_phone, trim};
pub use validators::{
    validate_age, validate_email, validate_min_length, validate_phone, AGE_OUT_OF_RANGE,
    EMAIL_INVALID, FIELD_REQUIRED, NAME_TOO_SHORT, NOT_AN_INTEGER, NOT_A_STRING,
    PHONE_NOT_DIGITS, PHONE_TOO_SHORT,
};

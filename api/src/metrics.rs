use once_cell::sync::Lazy;
use prometheus::{opts, Encoder, HistogramOpts, HistogramVec, IntCounterVec, Registry, TextEncoder};
use validator_shared::FieldErrors;

macro_rules! counter_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| {
            IntCounterVec::new(opts!($name, $help), $labels).expect("valid counter definition")
        })
    };
}
macro_rules! histogram_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| {
            HistogramVec::new(
                HistogramOpts::new($name, $help).buckets(LATENCY_BUCKETS.to_vec()),
                $labels,
            )
            .expect("valid histogram definition")
        })
    };
}

const LATENCY_BUCKETS: [f64; 10] = [
    0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 1.0,
];

// ── HTTP ────────────────────────────────────────────────────────────────────
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> =
    counter_vec!("http_requests_total", "Total HTTP requests", &["method", "path", "status"]);
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> =
    histogram_vec!("http_request_duration_seconds", "HTTP request latency", &["method", "path"]);

// ── Validation ──────────────────────────────────────────────────────────────
pub static VALIDATIONS_TOTAL: Lazy<IntCounterVec> =
    counter_vec!("validations_total", "Submissions by outcome", &["outcome"]);
pub static FIELD_ERRORS_TOTAL: Lazy<IntCounterVec> =
    counter_vec!("field_errors_total", "Field validation failures by field", &["field"]);

/// Label values for [`VALIDATIONS_TOTAL`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    Invalid,
    Malformed,
    Error,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Valid => "valid",
            Outcome::Invalid => "invalid",
            Outcome::Malformed => "malformed",
            Outcome::Error => "error",
        }
    }
}

pub fn register_all(r: &Registry) -> prometheus::Result<()> {
    r.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    r.register(Box::new(HTTP_REQUEST_DURATION.clone()))?;
    r.register(Box::new(VALIDATIONS_TOTAL.clone()))?;
    r.register(Box::new(FIELD_ERRORS_TOTAL.clone()))?;
    Ok(())
}

pub fn gather_metrics(r: &Registry) -> String {
    let encoder = TextEncoder::new();
    let families = r.gather();
    let mut buf = Vec::new();
    encoder.encode(&families, &mut buf).unwrap_or_default();
    String::from_utf8(buf).unwrap_or_default()
}

pub fn observe_http(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

pub fn observe_validation(outcome: Outcome) {
    VALIDATIONS_TOTAL
        .with_label_values(&[outcome.as_str()])
        .inc();
}

pub fn observe_field_errors(errors: &FieldErrors) {
    for e in errors.iter() {
        FIELD_ERRORS_TOTAL.with_label_values(&[e.field.as_str()]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_registry() -> Registry {
        let r = Registry::new_custom(Some("test".into()), None).unwrap();
        register_all(&r).unwrap();
        r
    }

    #[test]
    fn test_register_all_twice_fails() {
        let r = fresh_registry();
        assert!(register_all(&r).is_err());
    }

    #[test]
    fn test_observe_http() {
        let r = fresh_registry();
        observe_http("POST", "/validate", 422, 0.0004);
        let out = gather_metrics(&r);
        assert!(out.contains("test_http_requests_total"));
        assert!(out.contains("test_http_request_duration_seconds"));
    }

    #[test]
    fn test_observe_validation_outcomes() {
        let r = fresh_registry();
        observe_validation(Outcome::Valid);
        observe_validation(Outcome::Malformed);

        let mut errors = FieldErrors::new();
        errors.insert("phone", "Phone must contain only digits");
        observe_field_errors(&errors);

        let out = gather_metrics(&r);
        assert!(out.contains(r#"outcome="valid""#));
        assert!(out.contains(r#"outcome="malformed""#));
        assert!(out.contains(r#"field="phone""#));
    }
}

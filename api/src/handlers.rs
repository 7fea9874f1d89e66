use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use validator_shared::{ApiInfo, HealthStatus, Submission, ValidationSuccess};

use crate::{
    error::{timestamp_now, ApiError, ApiResult},
    events::ValidationEvent,
    metrics::{self, Outcome},
    state::AppState,
    validation::{self, SubmissionJson, Validation},
};

pub const SERVICE_NAME: &str = "Personal Data Validator";
pub const SERVICE_DESCRIPTION: &str =
    "REST API that validates and normalizes personal data submissions";
pub const VALIDATION_SUCCEEDED_MESSAGE: &str = "Data validated successfully";

pub async fn api_info(State(state): State<AppState>) -> Json<ApiInfo> {
    Json(ApiInfo {
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: SERVICE_DESCRIPTION.to_string(),
        documentation: state.config.docs_url(),
        timestamp: timestamp_now(),
    })
}

pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: timestamp_now(),
    })
}

pub async fn api_docs() -> Json<Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            {"method": "GET", "path": "/", "description": "Service information"},
            {"method": "GET", "path": "/health", "description": "Liveness check"},
            {"method": "GET", "path": "/docs", "description": "This document"},
            {"method": "GET", "path": "/metrics", "description": "Prometheus metrics"},
            {
                "method": "POST",
                "path": "/validate",
                "description": "Validate and normalize a personal data submission",
                "responses": {
                    "200": "All fields valid; normalized record under `data`",
                    "422": "Validation failed; per-field messages under `errors`",
                    "500": "Unexpected internal error"
                }
            }
        ],
        "fields": {
            "first_name": "required string, at least 2 characters after trimming; capitalized",
            "last_name": "required string, at least 2 characters after trimming; capitalized",
            "email": "required string in local@domain.tld form",
            "phone": "optional string of digits only, at least 7 digits; trimmed",
            "age": "optional integer between 0 and 120"
        },
        "example": {
            "first_name": "juan",
            "last_name": "perez",
            "email": "juan.perez@example.com",
            "phone": "1234567",
            "age": 30
        }
    }))
}

/// Validate one submission.
///
/// Body-level rejections arrive here as `Err` so they are logged and counted
/// like every other outcome.
pub async fn validate_submission(
    State(state): State<AppState>,
    payload: Result<SubmissionJson, ApiError>,
) -> ApiResult<(StatusCode, Json<ValidationSuccess>)> {
    let SubmissionJson(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let reason = rejection
                .field_errors()
                .map(|errors| errors.to_string())
                .unwrap_or_else(|| rejection.to_string());
            state
                .events
                .record(ValidationEvent::MalformedBody { reason });
            metrics::observe_validation(Outcome::Malformed);
            return Err(rejection);
        }
    };

    state.events.record(ValidationEvent::Attempted {
        email: Submission::display_field(&submission.email),
        first_name: Submission::display_field(&submission.first_name),
        last_name: Submission::display_field(&submission.last_name),
    });

    match run_ruleset(&submission, validation::validate) {
        Ok(Validation::Valid(record)) => {
            state.events.record(ValidationEvent::Accepted {
                email: record.email.clone(),
            });
            metrics::observe_validation(Outcome::Valid);
            Ok((
                StatusCode::OK,
                Json(ValidationSuccess {
                    valid: true,
                    message: VALIDATION_SUCCEEDED_MESSAGE.to_string(),
                    data: record,
                    timestamp: timestamp_now(),
                }),
            ))
        }
        Ok(Validation::Invalid(errors)) => {
            state.events.record(ValidationEvent::Rejected {
                errors: errors.clone(),
            });
            metrics::observe_validation(Outcome::Invalid);
            metrics::observe_field_errors(&errors);
            Err(ApiError::validation(errors))
        }
        Err(error) => {
            state.events.record(ValidationEvent::Failed {
                error: error.clone(),
            });
            metrics::observe_validation(Outcome::Error);
            Err(ApiError::internal(error))
        }
    }
}

pub async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics::gather_metrics(&state.registry),
    )
}

pub async fn route_not_found() -> ApiError {
    ApiError::not_found()
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// Run a ruleset, turning a panic into its message so the request still
/// gets a response.
pub fn run_ruleset<F>(submission: &Submission, ruleset: F) -> Result<Validation, String>
where
    F: FnOnce(&Submission) -> Validation,
{
    panic::catch_unwind(AssertUnwindSafe(|| ruleset(submission)))
        .map_err(|payload| panic_message(payload.as_ref()))
}

pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::events::MemorySink;
    use std::sync::Arc;
    use validator_shared::ValidatedRecord;

    #[test]
    fn test_run_ruleset_passes_result_through() {
        let submission = Submission::default();
        let result = run_ruleset(&submission, validation::validate).unwrap();
        assert!(!result.is_valid());
    }

    #[test]
    fn test_run_ruleset_catches_panics() {
        let submission = Submission::default();
        let result = run_ruleset(&submission, |_| panic!("ruleset exploded"));
        assert_eq!(result, Err("ruleset exploded".to_string()));
    }

    #[test]
    fn test_run_ruleset_catches_formatted_panics() {
        let submission = Submission::default();
        let result = run_ruleset(&submission, |_| -> Validation {
            let field = "age";
            panic!("bad field {}", field)
        });
        assert_eq!(result, Err("bad field age".to_string()));
    }

    #[test]
    fn test_run_ruleset_valid_record() {
        let submission = Submission::default();
        let record = ValidatedRecord {
            first_name: "Juan".into(),
            last_name: "Perez".into(),
            email: "juan@example.com".into(),
            phone: None,
            age: None,
        };
        let expected = record.clone();
        let result = run_ruleset(&submission, move |_| Validation::Valid(record));
        assert_eq!(result, Ok(Validation::Valid(expected)));
    }

    #[test]
    fn test_panic_message_unknown_payload() {
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }

    #[tokio::test]
    async fn test_health_check() {
        let Json(health) = health_check().await;
        assert_eq!(health.status, "healthy");
    }

    #[tokio::test]
    async fn test_metrics_endpoint_exposes_validation_counters() {
        let registry = prometheus::Registry::new_custom(Some("handler".into()), None).unwrap();
        metrics::register_all(&registry).unwrap();
        let state = AppState::new(
            ServerConfig::default(),
            Arc::new(MemorySink::new()),
            registry,
        );
        metrics::observe_validation(Outcome::Malformed);

        let resp = metrics_endpoint(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("handler_validations_total"));
        assert!(text.contains(r#"outcome="malformed""#));
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use validator_shared::{FieldErrors, InternalFailure, ValidationFailure};

use crate::validation::BODY_FIELD;

pub const VALIDATION_FAILED_MESSAGE: &str = "The submitted data contains validation errors";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const NOT_FOUND_MESSAGE: &str = "Route not found";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

/// Response timestamp: RFC 3339 UTC with milliseconds
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    errors: Option<FieldErrors>,
    detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
            detail: None,
        }
    }

    /// 422 carrying per-field failures
    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            errors: Some(errors),
            ..Self::new(StatusCode::UNPROCESSABLE_ENTITY, VALIDATION_FAILED_MESSAGE)
        }
    }

    /// 422 for a body that could not be decoded into a submission
    pub fn malformed_body(reason: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(BODY_FIELD, reason);
        Self::validation(errors)
    }

    /// 500 echoing the raw error text
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.errors.as_ref()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.status)?;
        if let Some(errors) = &self.errors {
            write!(f, ": {}", errors)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let timestamp = timestamp_now();
        match self.errors {
            Some(errors) => (
                self.status,
                Json(ValidationFailure {
                    valid: false,
                    message: self.message,
                    errors,
                    timestamp,
                }),
            )
                .into_response(),
            None => (
                self.status,
                Json(InternalFailure {
                    valid: false,
                    message: self.message,
                    error: self.detail,
                    timestamp,
                }),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_shape() {
        let mut errors = FieldErrors::new();
        errors.insert("first_name", "Must have at least 2 characters");
        let response = ApiError::validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["valid"], false);
        assert_eq!(body["message"], VALIDATION_FAILED_MESSAGE);
        assert_eq!(body["errors"]["first_name"], "Must have at least 2 characters");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_internal_error_echoes_detail() {
        let response = ApiError::internal("ruleset exploded").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["valid"], false);
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
        assert_eq!(body["error"], "ruleset exploded");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_not_found_shape() {
        let response = ApiError::not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["message"], NOT_FOUND_MESSAGE);
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_method_not_allowed_shape() {
        let response = ApiError::method_not_allowed().into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["valid"], false);
        assert_eq!(body["message"], METHOD_NOT_ALLOWED_MESSAGE);
    }

    #[test]
    fn test_malformed_body_uses_body_field() {
        let err = ApiError::malformed_body("JSON syntax error");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.field_errors().unwrap().get(BODY_FIELD),
            Some("JSON syntax error")
        );
        assert!(err.to_string().contains("422"));
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let ts = timestamp_now();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}

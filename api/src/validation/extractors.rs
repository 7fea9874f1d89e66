//! Axum extractor for submission bodies
//!
//! `SubmissionJson` decodes the body as JSON, requires a top-level object and
//! turns every body-level rejection (bad syntax, non-object payload, missing
//! content type) into a 422 [`ApiError`] carrying a single `body` entry, so
//! malformed requests share the validation-failure wire shape.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde_json::Value;
use validator_shared::Submission;

use crate::error::ApiError;

/// Field name used for body-level parse errors
pub const BODY_FIELD: &str = "body";

const NOT_AN_OBJECT: &str = "Request body must be a JSON object";

pub struct SubmissionJson(pub Submission);

#[async_trait]
impl<S> FromRequest<S> for SubmissionJson
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|err| ApiError::malformed_body(rejection_message(&err)))?;

        // Arrays would otherwise decode positionally into the struct
        if !value.is_object() {
            return Err(ApiError::malformed_body(NOT_AN_OBJECT));
        }

        let submission = serde_json::from_value::<Submission>(value)
            .map_err(|err| ApiError::malformed_body(format!("Invalid JSON data: {}", err)))?;
        Ok(SubmissionJson(submission))
    }
}

fn rejection_message(err: &JsonRejection) -> String {
    match err {
        JsonRejection::JsonDataError(e) => format!("Invalid JSON data: {}", e.body_text()),
        JsonRejection::JsonSyntaxError(e) => format!("JSON syntax error: {}", e.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Content-Type must be application/json".to_string()
        }
        JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
        _ => "Invalid JSON payload".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{self, header, StatusCode};
    use serde_json::json;

    fn json_request(body: &str) -> Request {
        http::Request::builder()
            .method("POST")
            .uri("/validate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_extracts_object_body() {
        let body = json!({"first_name": "juan", "age": 30}).to_string();
        let SubmissionJson(submission) = SubmissionJson::from_request(json_request(&body), &())
            .await
            .unwrap();
        assert_eq!(submission.first_name, Some(json!("juan")));
        assert_eq!(submission.age, Some(json!(30)));
        assert_eq!(submission.email, None);
    }

    #[tokio::test]
    async fn test_syntax_error_is_unprocessable() {
        let err = SubmissionJson::from_request(json_request("{not json"), &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.fields(), vec![BODY_FIELD]);
        assert!(errors.get(BODY_FIELD).unwrap().starts_with("JSON syntax error"));
    }

    #[tokio::test]
    async fn test_non_object_body_is_unprocessable() {
        let err = SubmissionJson::from_request(json_request("[1, 2, 3]"), &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.field_errors().and_then(|e| e.get(BODY_FIELD)),
            Some(NOT_AN_OBJECT)
        );
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/validate")
            .body(Body::from("{}"))
            .unwrap();
        let err = SubmissionJson::from_request(req, &()).await.err().unwrap();
        assert_eq!(
            err.field_errors().and_then(|e| e.get(BODY_FIELD)),
            Some("Content-Type must be application/json")
        );
    }
}

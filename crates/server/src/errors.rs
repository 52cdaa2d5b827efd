use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": "...", "detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, detail: Option<String>) -> Self {
        Self { status, error: error.to_string(), detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) | ServiceError::InvalidDocument(msg) => {
                JsonApiError::new(StatusCode::BAD_REQUEST, "Bad Request", Some(msg))
            }
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::Conflict(msg) => JsonApiError::new(StatusCode::CONFLICT, "Conflict", Some(msg)),
            other => {
                error!(error = %other, "request failed");
                JsonApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    Some(other.to_string()),
                )
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Bad Request", Some(rejection.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status() {
        let cases = [
            (ServiceError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (ServiceError::InvalidDocument("d".into()), StatusCode::BAD_REQUEST),
            (ServiceError::app_not_found(), StatusCode::NOT_FOUND),
            (ServiceError::app_exists(), StatusCode::CONFLICT),
            (ServiceError::Export("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn conflict_keeps_human_message() {
        let e = JsonApiError::from(ServiceError::app_exists());
        assert_eq!(e.detail.as_deref(), Some("An app with this name already exists."));
        let body = serde_json::to_value(&e).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Conflict", "detail": "An app with this name already exists."}));
    }
}

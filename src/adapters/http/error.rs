//! Error body shared by every HTTP module.
//!
//! Each module converts its own error enum with one `handle_*_error`
//! function; all of them end up here so the status table lives in one place.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;

/// Standard error response: `{"code": "...", "message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError, "Internal server error")
    }

    pub fn upstream_unavailable() -> Self {
        Self::new(ErrorCode::AIProviderError, "AI service unavailable")
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::TicketNotFound | ErrorCode::ConversationNotFound | ErrorCode::UserNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::AIProviderError => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the response for `code`. Server-side and upstream failures are
/// logged and answered with a fixed message.
pub fn error_response(code: ErrorCode, message: impl Into<String>) -> Response {
    let status = status_for(code);
    if status.is_server_error() {
        let message = message.into();
        tracing::error!(code = %code, error = %message, "Request failed");
        let body = if status == StatusCode::BAD_GATEWAY {
            ErrorResponse::upstream_unavailable()
        } else {
            ErrorResponse::internal()
        };
        return (status, Json(body)).into_response();
    }
    (status, Json(ErrorResponse::new(code, message))).into_response()
}

/// Rejection for path ids that are not integers.
pub fn invalid_id(resource: &str, raw: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(format!(
            "Invalid {} id: {}",
            resource, raw
        ))),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table() {
        assert_eq!(status_for(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::Conflict), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorCode::TicketNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::AIProviderError), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(ErrorCode::DatabaseError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_body_serializes_code_and_message() {
        let body = serde_json::to_value(ErrorResponse::forbidden("Not enough permissions")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"code": "FORBIDDEN", "message": "Not enough permissions"})
        );
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn infrastructure_details_are_hidden() {
        let response = error_response(ErrorCode::DatabaseError, "connection refused on 10.0.0.3");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"code": "INTERNAL_ERROR", "message": "Internal server error"})
        );
    }

    #[tokio::test]
    async fn upstream_details_are_hidden() {
        let response = error_response(
            ErrorCode::AIProviderError,
            "invalid request: status 400: {\"error\":\"model_not_found\"}",
        );
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["message"], "AI service unavailable");
        assert!(!body.to_string().contains("model_not_found"));
    }

    #[test]
    fn invalid_id_is_bad_request() {
        assert_eq!(invalid_id("ticket", "abc").status(), StatusCode::BAD_REQUEST);
    }
}

//! Error-to-HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use slotter_core::error::SlotterError;
use tracing::error;

/// API-facing error wrapper around the domain error.
///
/// The response body is `{"error": <machine code>, "message": ...}`.
/// Infrastructure failures get a generic body; their details are
/// logged but never leaked.
#[derive(Debug)]
pub struct ApiError(pub SlotterError);

impl From<SlotterError> for ApiError {
    fn from(err: SlotterError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.0 {
            SlotterError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, "not_found", self.0.to_string())
            }
            SlotterError::Forbidden { .. } => {
                (StatusCode::FORBIDDEN, "forbidden", self.0.to_string())
            }
            SlotterError::AuthenticationFailed { .. } => (
                StatusCode::UNAUTHORIZED,
                "authentication_failed",
                self.0.to_string(),
            ),
            SlotterError::AlreadyExists { .. } => (
                StatusCode::BAD_REQUEST,
                "already_exists",
                self.0.to_string(),
            ),
            SlotterError::AlreadyBooked { .. } => (
                StatusCode::BAD_REQUEST,
                "already_booked",
                self.0.to_string(),
            ),
            SlotterError::Validation { .. } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                self.0.to_string(),
            ),
            SlotterError::PolicyViolation { .. } => (
                StatusCode::BAD_REQUEST,
                "policy_violation",
                self.0.to_string(),
            ),
            SlotterError::Database(_)
            | SlotterError::Crypto(_)
            | SlotterError::Notification(_)
            | SlotterError::Internal(_) => {
                error!(error = %self.0, "Internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": code, "message": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (
                SlotterError::NotFound {
                    entity: "slot".into(),
                    id: "x".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                SlotterError::Forbidden {
                    reason: "no".into(),
                },
                StatusCode::FORBIDDEN,
            ),
            (
                SlotterError::AuthenticationFailed {
                    reason: "bad".into(),
                },
                StatusCode::UNAUTHORIZED,
            ),
            (
                SlotterError::AlreadyBooked { id: "x".into() },
                StatusCode::BAD_REQUEST,
            ),
            (
                SlotterError::Database("oops".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), status);
        }
    }
}

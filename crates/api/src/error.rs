//! Error types for the API.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use brain_core::BrainError;
use intake::{ActionResult, IntakeError};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while serving a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An intake action failed.
    #[error(transparent)]
    Intake(#[from] IntakeError),

    /// The request body could not be decoded.
    #[error(transparent)]
    Body(#[from] JsonRejection),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        let err = match self {
            ApiError::Intake(err) => err,
            ApiError::Body(rejection) => return rejection.status(),
        };
        match err {
            IntakeError::Unauthenticated => StatusCode::UNAUTHORIZED,
            IntakeError::UnknownStack(_) => StatusCode::NOT_FOUND,
            _ if err.is_not_found() => StatusCode::NOT_FOUND,
            _ if err.is_client_error() => StatusCode::BAD_REQUEST,
            IntakeError::ExtractionFormat(_) => StatusCode::BAD_GATEWAY,
            IntakeError::Brain(BrainError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            IntakeError::Brain(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Intake(err) => ActionResult::<()>::from(Err(err)),
            ApiError::Body(rejection) => {
                let detail = rejection.body_text();
                warn!("Rejected request body: {}", detail);
                ActionResult::failure(detail)
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use database::DatabaseError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (IntakeError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (IntakeError::UnknownStack("x".into()), StatusCode::NOT_FOUND),
            (
                IntakeError::Database(DatabaseError::NotFound {
                    entity: "Task",
                    id: "1".into(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (IntakeError::InvalidParent("x".into()), StatusCode::BAD_REQUEST),
            (IntakeError::ExtractionFormat("x".into()), StatusCode::BAD_GATEWAY),
            (IntakeError::Brain(BrainError::Timeout), StatusCode::GATEWAY_TIMEOUT),
            (
                IntakeError::Database(DatabaseError::AlreadyExists {
                    entity: "Task",
                    id: "1".into(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }
}

//! API error type and its HTTP mapping.
//!
//! Every failure leaves the service as `{"detail": ...}`: a message for
//! not-found and rejected requests, a list of field errors for validation.

use axum::Json;
use axum::extract::path::ErrorKind;
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use forum_types::api::{ErrorMessage, ValidationErrors};
use forum_types::validation::FieldError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Targeted row (or its parent forum) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body or path failed schema checks.
    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Rejected by the framework before reaching a handler.
    #[error("Rejected ({0}): {1}")]
    Rejected(StatusCode, String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn forum_not_found() -> Self {
        Self::NotFound("Forum not found.".into())
    }

    pub fn comment_not_found() -> Self {
        Self::NotFound("Comment not found.".into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(detail) => {
                (StatusCode::NOT_FOUND, Json(ErrorMessage { detail })).into_response()
            }
            ApiError::Validation(detail) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(ValidationErrors { detail })).into_response()
            }
            ApiError::Rejected(status, detail) => {
                (status, Json(ErrorMessage { detail })).into_response()
            }
            ApiError::Internal(err) => {
                error!("Request failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorMessage {
                        detail: "Internal Server Error".into(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => match err.kind() {
                ErrorKind::ParseErrorAtKey { key, value, .. } => {
                    ApiError::Validation(vec![FieldError::not_an_integer(key, value)])
                }
                _ => ApiError::Validation(vec![FieldError::invalid_path(err.body_text())]),
            },
            other => ApiError::Rejected(other.status(), other.body_text()),
        }
    }
}

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::rest::dto::ErrorBody;
use crate::contract::error::{EMAIL_ALREADY_IN_USE, USER_ALREADY_EXISTS};
use crate::domain::error::DomainError;

/// REST error: 400 and 404 carry no body, 422 and 500 carry `{ "error": ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found")]
    NotFound,
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("{0}")]
    Unprocessable(&'static str),
    #[error("internal error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST.into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE.into_response(),
            ApiError::Unprocessable(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody {
                    error: message.to_string(),
                }),
            )
                .into_response(),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Internal server error.".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UserNotFound { .. } => ApiError::NotFound,
            DomainError::UserAlreadyExists { .. } => ApiError::Unprocessable(USER_ALREADY_EXISTS),
            DomainError::EmailInUse { .. } => ApiError::Unprocessable(EMAIL_ALREADY_IN_USE),
            DomainError::Storage { .. } => {
                // Log the internal details but don't expose them to the client
                tracing::error!(error = ?e, "Storage error occurred");
                ApiError::Internal
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // a body over the configured limit is not an input error
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge;
        }
        ApiError::BadRequest(rejection.body_text())
    }
}

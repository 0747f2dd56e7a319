//! Error types for expense-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use expense_core::{CoreError, ErrorBody, ErrorCode};
use thiserror::Error;

const GENERIC_FAILURE: &str = "An unexpected server error occurred.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    MethodNotAllowed { message: String },

    #[error("{message}")]
    InternalError { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest { message: message.into() }
    }

    /// A 500 with the generic message
    pub fn unexpected() -> Self {
        ApiError::InternalError { message: GENERIC_FAILURE.to_string() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        let message = self.to_string();
        if message.is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        let message = error.to_string();
        match error.code() {
            ErrorCode::ValidationError => ApiError::BadRequest { message },
            ErrorCode::NotFound => ApiError::NotFound { message },
            ErrorCode::InternalError => ApiError::InternalError { message },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody::new(self.message());
        (self.status(), Json(body)).into_response()
    }
}

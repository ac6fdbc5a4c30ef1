//! Response envelope shared by every endpoint.
//!
//! Success bodies are `{ "messages": "<text>", "data": <payload> }`; errors
//! are `{ "messages": "<text>" | ["<text>", ...], "data": null }` with the
//! status derived from the [`ErrorCode`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Messages {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Serialize)]
struct Envelope<T> {
    messages: Messages,
    data: Option<T>,
}

/// Successful response carrying a payload.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    message: String,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
            data,
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<()> {
    /// A success with `"data": null`.
    pub fn message(message: impl Into<String>) -> Self {
        Self::ok(message, ())
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = Envelope {
            messages: Messages::One(self.message),
            data: Some(self.data),
        };
        (self.status, Json(body)).into_response()
    }
}

/// Error response; wraps a [`DomainError`].
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(DomainError::new(ErrorCode::ValidationFailed, message))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(DomainError::new(ErrorCode::Unauthorized, message))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self(DomainError::forbidden(message))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self(DomainError::not_found(ErrorCode::NotFound, message))
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.0.code)
    }

    fn messages(&self) -> Messages {
        let err = &self.0;
        match err.code {
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                Messages::One("Internal server error".to_string())
            }
            ErrorCode::ExternalServiceError => {
                Messages::One("An upstream service is unavailable".to_string())
            }
            _ if err.reasons.len() > 1 => Messages::Many(err.reasons.clone()),
            _ => Messages::One(err.message.clone()),
        }
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::InvalidResetLink | ErrorCode::InvalidFile => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::InvalidCredentials | ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::EmailTaken | ErrorCode::InvalidStateTransition | ErrorCode::Conflict => {
            StatusCode::CONFLICT
        }
        ErrorCode::ExternalServiceError => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        code if code.is_not_found() => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = %self.0.code, error = %self.0.message, "request failed");
        }
        let body: Envelope<()> = Envelope {
            messages: self.messages(),
            data: None,
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::api::rest::envelope::{ApiResponse, ErrorBody, ErrorCode};
use crate::domain::error::DomainError;

const VALIDATION_FAILED: &str = "Validation failed";
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Every failure the REST layer can answer with.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Wire (camelCase) field name to message.
    #[error("Validation failed")]
    Validation(BTreeMap<String, String>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),

    /// A failure produced outside the handlers (routing, body limit, timeout).
    #[error("{1}")]
    Status(StatusCode, String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Status(status, _) => *status,
        }
    }

    /// Envelope for a bare status code, e.g. an unmatched route or an oversized body.
    pub fn from_status(status: StatusCode) -> Self {
        let message = status.canonical_reason().unwrap_or("Request failed");
        Self::Status(status, message.to_string())
    }
}

/// `first_name` -> `firstName`
pub fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Map domain error to the REST error taxonomy
impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UserNotFound { .. } => Self::NotFound(e.to_string()),
            DomainError::EmailAlreadyExists { .. } => Self::Conflict(e.to_string()),
            DomainError::Validation { errors } => Self::Validation(
                errors
                    .into_iter()
                    .map(|(field, message)| (to_camel_case(&field), message))
                    .collect(),
            ),
            DomainError::InvalidPaging { message } => Self::BadRequest(message),
            DomainError::Database { .. } => {
                // Log the internal error details but don't expose them to the client
                tracing::error!(error = ?e, "Database error occurred");
                Self::Internal(INTERNAL_MESSAGE.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            Self::Validation(errors) => {
                let body = ApiResponse::failure(VALIDATION_FAILED, errors);
                return (status, Json(body)).into_response();
            }
            Self::NotFound(m) => (ErrorCode::ResourceNotFound, m),
            Self::Conflict(m) => (ErrorCode::DuplicateEntity, m),
            Self::BadRequest(m) => (ErrorCode::BadRequest, m),
            Self::Internal(m) => (ErrorCode::InternalServerError, m),
            Self::Status(status, m) if status == StatusCode::NOT_FOUND => {
                (ErrorCode::ResourceNotFound, m)
            }
            Self::Status(status, m) if status.is_server_error() => {
                (ErrorCode::InternalServerError, m)
            }
            Self::Status(_, m) => (ErrorCode::BadRequest, m),
        };
        let body = ApiResponse::failure(
            message.clone(),
            ErrorBody {
                error_code: code,
                message,
            },
        );
        (status, Json(body)).into_response()
    }
}

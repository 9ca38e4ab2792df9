//! Uniform JSON envelope wrapped around every request and response body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `{ "message"?, "status", "data"?, "timestamp" }`. Empty fields are omitted.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(with = "timestamp_format")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseStatus {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "Failure")]
    Failure,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            message: None,
            status: ResponseStatus::Success,
            data: Some(data),
            timestamp: Utc::now(),
        }
    }

    /// Success without a payload (used by delete).
    pub fn empty() -> Self {
        Self {
            message: None,
            status: ResponseStatus::Success,
            data: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failure(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            status: ResponseStatus::Failure,
            data: Some(data),
            timestamp: Utc::now(),
        }
    }
}

/// Request body wrapper: `{ "data": <payload> }`.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope<T> {
    pub data: T,
}

/// `data` of a non-validation failure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ResourceNotFound,
    DuplicateEntity,
    BadRequest,
    InternalServerError,
}

mod timestamp_format {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(FORMAT))
    }
}

//! Extractors that turn axum rejections into `ApiError` envelopes.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::api::rest::envelope::RequestEnvelope;
use crate::api::rest::error::ApiError;

/// JSON body wrapped in `{ "data": ... }`; yields the inner payload.
pub struct Envelope<T>(pub T);

impl<T, S> FromRequest<S> for Envelope<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(envelope) = Json::<RequestEnvelope<T>>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                debug!(error = %rejection, "rejected request body");
                match rejection.status() {
                    StatusCode::PAYLOAD_TOO_LARGE => {
                        ApiError::Status(StatusCode::PAYLOAD_TOO_LARGE, rejection.body_text())
                    }
                    _ => ApiError::BadRequest(rejection.body_text()),
                }
            })?;
        Ok(Envelope(envelope.data))
    }
}

/// The `{user_id}` path segment parsed as a UUID.
pub struct UserId(pub Uuid);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                debug!(error = %rejection, "rejected user id");
                ApiError::BadRequest(rejection.body_text())
            })?;
        Ok(UserId(id))
    }
}

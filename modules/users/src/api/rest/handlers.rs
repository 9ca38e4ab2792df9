use std::sync::Arc;

use axum::{extract::Query, http::StatusCode, Extension, Json};
use tracing::{debug, info};

use crate::api::rest::dto::{
    parse_list_params, CreateUserReq, UpdateUserReq, UserDto, UserPageDto,
};
use crate::api::rest::envelope::ApiResponse;
use crate::api::rest::error::ApiError;
use crate::api::rest::extract::{Envelope, UserId};
use crate::domain::service::Service;

type ApiResult<T> = Result<T, ApiError>;

/// List active users, one page at a time
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<ApiResponse<UserPageDto>>> {
    let request = parse_list_params(&params)?;
    info!("Listing users: page={} size={:?}", request.page, request.size);

    let page = svc.list_users(request).await.inspect_err(log_failure)?;
    Ok(Json(ApiResponse::success(UserPageDto::from(page))))
}

/// Get a specific user by ID
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    UserId(id): UserId,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    info!("Getting user with id: {}", id);

    let user = svc.get_user(id).await.inspect_err(log_failure)?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// Create a new user
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    Envelope(req_body): Envelope<CreateUserReq>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserDto>>)> {
    info!("Creating user: {:?}", req_body.email);

    let user = svc
        .create_user(req_body.into())
        .await
        .inspect_err(log_failure)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

/// Update an existing user with the fields present in the body
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    UserId(id): UserId,
    Envelope(req_body): Envelope<UpdateUserReq>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    info!("Updating user {}", id);

    let user = svc
        .update_user(id, req_body.into())
        .await
        .inspect_err(log_failure)?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// Soft-delete a user by ID
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    UserId(id): UserId,
) -> ApiResult<Json<ApiResponse<()>>> {
    info!("Deleting user: {}", id);

    svc.delete_user(id).await.inspect_err(log_failure)?;
    Ok(Json(ApiResponse::empty()))
}

/// Client errors are expected traffic; infrastructure failures are logged where they are mapped.
fn log_failure(e: &crate::domain::error::DomainError) {
    debug!("Request failed: {}", e);
}

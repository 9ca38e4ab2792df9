use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub const USERS_BASE_PATH: &str = "/v/api/users";

/// Mount the users REST routes onto `router`.
/// The collection answers with and without a trailing slash.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let collection = get(handlers::list_users).post(handlers::create_user);
    let item = get(handlers::get_user)
        .patch(handlers::update_user)
        .delete(handlers::delete_user);

    let users = Router::new()
        .route(USERS_BASE_PATH, collection.clone())
        .route(&format!("{USERS_BASE_PATH}/"), collection)
        .route(&format!("{USERS_BASE_PATH}/{{user_id}}"), item)
        .layer(Extension(service));

    router.merge(users)
}

use crate::api::rest::handlers;
use crate::domain::service::Service;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

/// Register the `/users` resource on `router`.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route("/users", post(handlers::create_user).get(handlers::list_users))
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .layer(Extension(service))
}

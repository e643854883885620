use utoipa::OpenApi;

use crate::api::rest::dto::{CreateUserReq, ErrorBody, UpdateUserReq, UserDto};
use crate::api::rest::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users Directory",
        description = "CRUD over user records with email uniqueness"
    ),
    paths(
        handlers::list_users,
        handlers::get_user,
        handlers::create_user,
        handlers::update_user,
        handlers::delete_user
    ),
    components(schemas(UserDto, CreateUserReq, UpdateUserReq, ErrorBody)),
    tags((name = "users", description = "User management"))
)]
pub struct UsersApiDoc;

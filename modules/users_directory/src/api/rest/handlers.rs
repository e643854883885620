use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    response::Json,
    Extension,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::rest::dto::{CreateUserReq, ErrorBody, UpdateUserReq, UserDto};
use crate::api::rest::error::ApiError;
use crate::domain::service::Service;

const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// Only the canonical 8-4-4-4-12 form names a user; any other spelling,
/// including forms `Uuid::try_parse` tolerates (simple, braced, urn), is malformed.
fn parse_user_id(raw: &str) -> Result<Uuid, ApiError> {
    let malformed = || ApiError::BadRequest(format!("malformed user id '{raw}'"));
    let bytes = raw.as_bytes();
    if bytes.len() != 36 || HYPHEN_POSITIONS.iter().any(|&i| bytes[i] != b'-') {
        return Err(malformed());
    }
    Uuid::try_parse(raw).map_err(|_| malformed())
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses((status = 200, description = "Every stored user", body = [UserDto]))
)]
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    info!("Listing users");

    let users = svc.list_users().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User UUID")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserDto>, ApiError> {
    let id = parse_user_id(&raw_id)?;
    info!("Getting user with id: {}", id);

    let user = svc.get_user(id).await?;
    Ok(Json(UserDto::from(user)))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserReq,
    responses(
        (status = 201, description = "Created user", body = UserDto),
        (status = 400, description = "Missing or invalid name/email"),
        (status = 413, description = "Body over the configured limit"),
        (status = 422, description = "Email already registered", body = ErrorBody)
    )
)]
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<CreateUserReq>, JsonRejection>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let Json(req_body) = payload?;
    info!("Creating user: {:?}", req_body);

    let user = svc.create_user(req_body.try_into()?).await.inspect_err(|e| {
        warn!("Failed to create user: {}", e);
    })?;
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// Replace name and email of an existing user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User UUID")),
    request_body = UpdateUserReq,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Malformed id or missing/invalid name/email"),
        (status = 404, description = "User not found"),
        (status = 413, description = "Body over the configured limit"),
        (status = 422, description = "Email used by another user", body = ErrorBody)
    )
)]
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateUserReq>, JsonRejection>,
) -> Result<Json<UserDto>, ApiError> {
    let id = parse_user_id(&raw_id)?;
    let Json(req_body) = payload?;
    info!("Updating user {} with: {:?}", id, req_body);

    let user = svc
        .update_user(id, req_body.try_into()?)
        .await
        .inspect_err(|e| warn!("Failed to update user {}: {}", id, e))?;
    Ok(Json(UserDto::from(user)))
}

/// Delete a user by ID; deleting an absent user also succeeds
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User UUID")),
    responses(
        (status = 204, description = "User removed or already absent"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_user_id(&raw_id)?;
    info!("Deleting user: {}", id);

    svc.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_canonical_hyphenated_ids() {
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(&id.hyphenated().to_string()).unwrap(), id);
        assert!(parse_user_id(&id.hyphenated().to_string().to_uppercase()).is_ok());

        for raw in [
            id.simple().to_string(),
            id.braced().to_string(),
            id.urn().to_string(),
            "67e55044-10b1-426f-9247-bb680e5fe0cz".to_string(),
            "67e5504410b1-426f-9247-bb680e5fe0c8-".to_string(),
            String::new(),
        ] {
            assert!(
                matches!(parse_user_id(&raw), Err(ApiError::BadRequest(_))),
                "{raw} should be rejected"
            );
        }
    }
}

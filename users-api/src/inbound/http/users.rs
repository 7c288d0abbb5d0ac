//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! POST   /api/users      {"name":"Ada Lovelace","email":"ada@example.com"}
//! PUT    /api/users/{id} {"name":"Ada Lovelace","email":"ada@example.com"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{SaveUser, UserPersistenceError};
use crate::domain::{Error, NewUser, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request payload for creating or replacing a user.
///
/// Example JSON:
/// `{"name":"Ada Lovelace","email":"ada@example.com"}`
///
/// Unknown fields are ignored, so clients that echo back a fetched user
/// (identifier included) remain accepted; the identifier in the request
/// path is authoritative.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl From<UserPayload> for NewUser {
    fn from(value: UserPayload) -> Self {
        Self::new(value.name, value.email)
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}

/// List every stored user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All stored users", body = [User]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state
        .users
        .find_all()
        .await
        .map_err(map_persistence_error)?;
    Ok(web::Json(users))
}

/// Fetch a single user by identifier.
///
/// Responds 404 with an empty body when no user carries the identifier.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The requested user", body = User),
        (status = 404, description = "No user with this identifier"),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(state: web::Data<HttpState>, id: web::Path<i64>) -> ApiResult<HttpResponse> {
    let id = UserId::new(id.into_inner());
    let maybe_user = state
        .users
        .find_by_id(id)
        .await
        .map_err(map_persistence_error)?;

    match maybe_user {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Create a user from the submitted attributes.
///
/// The store assigns the identifier; any identifier in the payload is
/// ignored.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "The created user", body = User),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let new_user = NewUser::from(payload.into_inner());
    let created = state
        .users
        .save(SaveUser::New(&new_user))
        .await
        .map_err(map_persistence_error)?;
    Ok(HttpResponse::Created().json(created))
}

/// Replace the name and email of an existing user.
///
/// The stored identifier is kept; only the submitted attributes change.
/// Responds 404 with an empty body when no user carries the identifier.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "The updated user", body = User),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 404, description = "No user with this identifier"),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(id.into_inner());
    let Some(existing) = state
        .users
        .find_by_id(id)
        .await
        .map_err(map_persistence_error)?
    else {
        return Ok(HttpResponse::NotFound().finish());
    };

    let payload = payload.into_inner();
    let updated = User::new(existing.id, payload.name, payload.email);
    let saved = state
        .users
        .save(SaveUser::Existing(&updated))
        .await
        .map_err(map_persistence_error)?;
    Ok(HttpResponse::Ok().json(saved))
}

/// Delete a user by identifier.
///
/// Responds 404 with an empty body when no user carries the identifier.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "No user with this identifier"),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(id.into_inner());
    let Some(existing) = state
        .users
        .find_by_id(id)
        .await
        .map_err(map_persistence_error)?
    else {
        return Ok(HttpResponse::NotFound().finish());
    };

    state
        .users
        .delete(&existing)
        .await
        .map_err(map_persistence_error)?;
    Ok(HttpResponse::NoContent().finish())
}

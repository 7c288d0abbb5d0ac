//! OpenAPI document assembly.
//!
//! [`ApiDoc`] derives the document covering every route the server mounts:
//! the five `/api/users` operations and both health probes, together with
//! the [`User`], [`UserPayload`], [`Error`], and [`ErrorCode`] schemas they
//! reference. Debug builds serve the document through Swagger UI; `cargo run
//! --bin openapi-dump` prints it for external tooling.
//!
//! [`User`]: crate::domain::User
//! [`Error`]: crate::domain::Error
//! [`ErrorCode`]: crate::domain::ErrorCode
//! [`UserPayload`]: crate::inbound::http::users::UserPayload

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, User};
use crate::inbound::http::users::UserPayload;

/// Top-level OpenAPI description of the service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "HTTP interface for user records and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(User, UserPayload, Error, ErrorCode)),
    tags(
        (name = "users", description = "Operations on stored user records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

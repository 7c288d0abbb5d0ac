//! HTTP server assembly.
//!
//! Selects the user repository for the configured persistence mode, mounts
//! the route tree plus health probes, and starts the listener. Swagger UI is
//! mounted in debug builds only.

mod config;

pub use config::{ServerConfig, Settings};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use users_api::Trace;
#[cfg(debug_assertions)]
use users_api::doc::ApiDoc;
use users_api::domain::ports::{InMemoryUserRepository, UserRepository};
use users_api::inbound::http::health::{HealthState, live, ready};
use users_api::inbound::http::state::HttpState;
use users_api::inbound::http::users::{create_user, delete_user, get_user, list_users, update_user};
use users_api::outbound::persistence::DieselUserRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Select the user repository implementation based on the available pool.
///
/// Generic over the pool type so tests can exercise both branches without a
/// running database.
fn build_users_repository_with_pool<Pool, Repo>(
    pool: &Option<Pool>,
    make_repository: impl FnOnce(&Pool) -> Repo,
) -> Arc<dyn UserRepository>
where
    Repo: UserRepository + 'static,
{
    match pool {
        Some(pool) => Arc::new(make_repository(pool)),
        None => Arc::new(InMemoryUserRepository::new()),
    }
}

/// Build the user repository from configuration.
///
/// Uses the Diesel-backed repository when a pool is available, otherwise the
/// in-memory store keeps the API fully functional for local runs.
fn build_users_repository(config: &ServerConfig) -> Arc<dyn UserRepository> {
    build_users_repository_with_pool(&config.db_pool, |pool| {
        DieselUserRepository::new(pool.clone())
    })
}

/// Assemble the route tree shared by the real server and the endpoint tests.
fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .service(list_users)
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(delete_user);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Bind the listener and start serving the API.
///
/// The returned [`Server`] must be awaited to drive the listener.
/// `health_state` is marked ready once the socket is bound, which flips
/// `/health/ready` to 200.
///
/// # Errors
/// Returns [`std::io::Error`] when the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let users = build_users_repository(&config);
    let http_state = web::Data::new(HttpState::new(users));
    let ServerConfig { bind_addr, .. } = config;

    let app_health_state = health_state.clone();
    let server = HttpServer::new(move || build_app(app_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}

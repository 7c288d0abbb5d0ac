//! End-to-end behaviour of the users REST API over the in-memory store.
//!
//! These tests drive the fully wired application surface: CRUD handlers
//! under `/api`, the trace middleware, and the health probes.

use std::sync::Arc;

use actix_http::Request;
use actix_web::{
    App,
    body::BoxBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test::{self, TestRequest},
    web,
};
use rstest::rstest;
use serde_json::{Value, json};
use users_api::Trace;
use users_api::domain::ports::InMemoryUserRepository;
use users_api::inbound::http::health::{HealthState, live, ready};
use users_api::inbound::http::state::HttpState;
use users_api::inbound::http::users::{create_user, delete_user, get_user, list_users, update_user};

async fn init_app(
    health_state: web::Data<HealthState>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let state = HttpState::new(Arc::new(InMemoryUserRepository::new()));
    test::init_service(
        App::new()
            .app_data(health_state)
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(
                web::scope("/api")
                    .service(list_users)
                    .service(get_user)
                    .service(create_user)
                    .service(update_user)
                    .service(delete_user),
            )
            .service(ready)
            .service(live),
    )
    .await
}

async fn ready_app()
-> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    init_app(health_state).await
}

async fn create_user_record(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    name: &str,
    email: &str,
) -> Value {
    let response = test::call_service(
        app,
        TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": name, "email": email}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    test::read_body_json(response).await
}

#[actix_web::test]
async fn create_then_fetch_round_trips_the_record() {
    let app = ready_app().await;

    let created = create_user_record(&app, "Ada Lovelace", "ada@example.com").await;
    assert_eq!(
        created,
        json!({"id": 1, "name": "Ada Lovelace", "email": "ada@example.com"})
    );

    let response = test::call_service(
        &app,
        TestRequest::get().uri("/api/users/1").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Value = test::read_body_json(response).await;
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn client_supplied_identifier_is_ignored_on_create() {
    let app = ready_app().await;

    let response = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/users")
            .set_json(json!({
                "id": 999,
                "name": "Ada Lovelace",
                "email": "ada@example.com"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(response).await;
    assert_eq!(created.get("id").and_then(Value::as_i64), Some(1));
}

#[actix_web::test]
async fn listing_returns_every_stored_record() {
    let app = ready_app().await;
    let ada = create_user_record(&app, "Ada Lovelace", "ada@example.com").await;
    let grace = create_user_record(&app, "Grace Hopper", "grace@example.com").await;

    let response =
        test::call_service(&app, TestRequest::get().uri("/api/users").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed: Value = test::read_body_json(response).await;
    assert_eq!(listed, json!([ada, grace]));
}

#[actix_web::test]
async fn update_rewrites_attributes_and_preserves_identifier() {
    let app = ready_app().await;
    create_user_record(&app, "Ada Lovelace", "ada@example.com").await;

    let response = test::call_service(
        &app,
        TestRequest::put()
            .uri("/api/users/1")
            .set_json(json!({"name": "Ada King", "email": "ada@lovelace.example"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(response).await;
    assert_eq!(
        updated,
        json!({"id": 1, "name": "Ada King", "email": "ada@lovelace.example"})
    );

    let fetched = test::call_service(
        &app,
        TestRequest::get().uri("/api/users/1").to_request(),
    )
    .await;
    let fetched: Value = test::read_body_json(fetched).await;
    assert_eq!(fetched, updated);
}

#[actix_web::test]
async fn delete_removes_the_record_and_reports_no_content() {
    let app = ready_app().await;
    create_user_record(&app, "Ada Lovelace", "ada@example.com").await;

    let deleted = test::call_service(
        &app,
        TestRequest::delete().uri("/api/users/1").to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let body = test::read_body(deleted).await;
    assert!(body.is_empty());

    let fetched = test::call_service(
        &app,
        TestRequest::get().uri("/api/users/1").to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn repeated_delete_reports_not_found() {
    let app = ready_app().await;
    create_user_record(&app, "Ada Lovelace", "ada@example.com").await;

    let first = test::call_service(
        &app,
        TestRequest::delete().uri("/api/users/1").to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = test::call_service(
        &app,
        TestRequest::delete().uri("/api/users/1").to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    let body = test::read_body(second).await;
    assert!(body.is_empty());
}

#[derive(Debug, Clone, Copy)]
enum AbsentUserCall {
    Fetch,
    Update,
    Remove,
}

fn absent_user_request(call: AbsentUserCall) -> Request {
    match call {
        AbsentUserCall::Fetch => TestRequest::get().uri("/api/users/404").to_request(),
        AbsentUserCall::Update => TestRequest::put()
            .uri("/api/users/404")
            .set_json(json!({"name": "Grace Hopper", "email": "grace@example.com"}))
            .to_request(),
        AbsentUserCall::Remove => TestRequest::delete().uri("/api/users/404").to_request(),
    }
}

#[rstest]
#[case(AbsentUserCall::Fetch)]
#[case(AbsentUserCall::Update)]
#[case(AbsentUserCall::Remove)]
#[actix_web::test]
async fn absent_users_yield_empty_404(#[case] call: AbsentUserCall) {
    let app = ready_app().await;

    let response = test::call_service(&app, absent_user_request(call)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND, "{call:?}");
    let body = test::read_body(response).await;
    assert!(body.is_empty(), "{call:?} should have an empty body");
}

#[actix_web::test]
async fn malformed_creation_payload_is_rejected() {
    let app = ready_app().await;

    let response = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": "Ada Lovelace"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn responses_carry_a_trace_id_header() {
    let app = ready_app().await;

    let response =
        test::call_service(&app, TestRequest::get().uri("/api/users").to_request()).await;
    let header = response
        .headers()
        .get("trace-id")
        .expect("trace id header")
        .to_str()
        .expect("header is ascii");
    uuid::Uuid::parse_str(header).expect("trace id is a UUID");
}

#[actix_web::test]
async fn readiness_reports_503_until_marked_ready() {
    let health_state = web::Data::new(HealthState::new());
    let app = init_app(health_state.clone()).await;

    let before = test::call_service(
        &app,
        TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

    health_state.mark_ready();
    let after = test::call_service(
        &app,
        TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(after.status(), StatusCode::OK);
}

#[actix_web::test]
async fn liveness_reports_drain_after_mark_unhealthy() {
    let health_state = web::Data::new(HealthState::new());
    let app = init_app(health_state.clone()).await;

    let alive = test::call_service(
        &app,
        TestRequest::get().uri("/health/live").to_request(),
    )
    .await;
    assert_eq!(alive.status(), StatusCode::OK);
    assert_eq!(
        alive
            .headers()
            .get("cache-control")
            .and_then(|value| value.to_str().ok()),
        Some("no-store")
    );

    health_state.mark_unhealthy();
    let draining = test::call_service(
        &app,
        TestRequest::get().uri("/health/live").to_request(),
    )
    .await;
    assert_eq!(draining.status(), StatusCode::SERVICE_UNAVAILABLE);
}

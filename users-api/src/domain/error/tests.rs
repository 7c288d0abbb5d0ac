//! Tests for the error payload formatting and trace propagation.

use super::*;
use crate::middleware::trace::TraceId;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_code(#[case] err: Error, #[case] expected: ErrorCode) {
    assert_eq!(err.code(), expected);
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn with_trace_id_overrides_captured_value(expected_trace_id: String) {
    let error = Error::not_found("missing").with_trace_id(expected_trace_id.clone());
    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn with_details_attaches_structured_payload() {
    let error = Error::invalid_request("bad").with_details(json!({ "field": "email" }));
    assert_eq!(error.details(), Some(&json!({ "field": "email" })));
}

#[rstest]
fn serialises_to_camel_case_envelope(expected_trace_id: String) {
    let error = Error::invalid_request("bad")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "field": "name" }));

    let value = serde_json::to_value(error).expect("serialise to JSON");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "bad",
            "traceId": expected_trace_id,
            "details": { "field": "name" }
        })
    );
}

#[rstest]
fn serialisation_omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::not_found("missing")).expect("serialise to JSON");
    assert_eq!(value, json!({ "code": "not_found", "message": "missing" }));
}

#[rstest]
fn deserialises_snake_case_trace_alias(expected_trace_id: String) {
    let parsed: Error = serde_json::from_value(json!({
        "code": "internal_error",
        "message": "boom",
        "trace_id": expected_trace_id
    }))
    .expect("deserialise from JSON");
    assert_eq!(parsed.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn display_prints_the_message() {
    assert_eq!(Error::internal("boom").to_string(), "boom");
}

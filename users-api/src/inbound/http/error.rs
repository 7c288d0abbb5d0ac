//! Actix rendering for the domain error envelope.
//!
//! Handlers return `Result<_, domain::Error>` and never touch status codes
//! themselves. The [`ResponseError`] impl below picks the status from the
//! error code, stamps the `trace-id` header, and serialises the envelope.
//! Server faults are redacted before serialisation so internal detail never
//! reaches a client.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TRACE_ID_HEADER;

/// Result alias used by the HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Body presented to clients. Internal faults collapse to a generic
/// envelope; every other code passes through unchanged.
fn client_view(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let generic = Error::internal("Internal server error");
    match error.trace_id() {
        Some(id) => generic.with_trace_id(id.to_owned()),
        None => generic,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        response.json(client_view(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Framework-level failures carry no client-safe message.
        error!(error = %err, "actix error surfaced as internal error");
        Error::internal("Internal server error")
    }
}

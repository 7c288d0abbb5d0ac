//! Transport-agnostic error envelope.
//!
//! Domain code reports failures with [`Error`] and never mentions HTTP. The
//! inbound adapter owns the translation to status codes and response bodies;
//! see `inbound::http::error` for that mapping.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::middleware::trace::TraceId;

/// Wire-stable failure category.
///
/// Serialised in `snake_case`; the names are part of the API contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Request payload or parameters failed validation.
    InvalidRequest,
    /// No resource exists at the requested identity.
    NotFound,
    /// A backing service the request depends on could not be reached.
    ServiceUnavailable,
    /// Unexpected server-side failure.
    InternalError,
}

/// Failure payload returned to API clients.
///
/// # Examples
/// ```
/// use users_api::domain::Error;
///
/// let err = Error::invalid_request("name must not be blank");
/// assert_eq!(err.message(), "name must not be blank");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    /// Machine-readable failure category.
    #[schema(example = "not_found")]
    code: ErrorCode,
    /// Human-readable description of what went wrong.
    #[schema(example = "user not found")]
    message: String,
    /// Identifier correlating this failure with its request logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(alias = "trace_id")]
    #[schema(example = "7f6e3a84-0a86-4c7d-9f0b-0f2d6d6a4b31")]
    trace_id: Option<String>,
    /// Structured extras such as per-field validation issues.
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Build an error with the given category and message.
    ///
    /// When a request trace is in scope its identifier is captured here, so
    /// envelopes correlate with log lines without any caller involvement.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Shorthand for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Shorthand for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Shorthand for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Shorthand for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message shown to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier, when one was captured or attached.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured extras, when any were attached.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Replace the correlation identifier.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured extras for the client.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::not_found("no such user")
    ///     .with_details(json!({ "id": 42 }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;

//! Actix handlers for the REST surface.
//!
//! Everything framework-facing lives here; the domain stays free of HTTP
//! types.

pub mod error;
pub mod health;
pub mod state;
pub mod users;

pub use error::ApiResult;

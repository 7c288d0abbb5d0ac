//! Core domain model for the users service.
//!
//! Types here are transport agnostic. Inbound adapters map them to HTTP
//! responses and outbound adapters persist them, so nothing in this module
//! may depend on Actix or Diesel.

pub mod error;
pub mod ports;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::user::{NewUser, User, UserId};

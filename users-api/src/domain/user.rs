//! User record types.
//!
//! [`User`] is a persisted record; [`NewUser`] carries the attributes of a
//! record that has not been stored yet and therefore has no identifier.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable user identifier assigned by the store on insert.
///
/// Clients never choose identifiers; the value is generated by the database
/// sequence backing the `users` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a store-assigned identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier value.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A stored user record.
///
/// Name and email are kept verbatim; the service applies no content
/// validation to either field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier.
    #[schema(value_type = i64, example = 1)]
    pub id: UserId,
    /// Name supplied by the client.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Email address supplied by the client.
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl User {
    /// Build a user from a store-assigned identifier and client attributes.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// User attributes before the store has assigned an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Name supplied by the client.
    pub name: String,
    /// Email address supplied by the client.
    pub email: String,
}

impl NewUser {
    /// Bundle client-supplied attributes for insertion.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

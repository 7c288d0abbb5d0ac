//! Diesel row structs for the users table.
//!
//! Private to the persistence adapter. The repository converts between these
//! and domain types at its boundary, so Diesel derives never leak upward.

use diesel::prelude::*;

use super::schema::users;

/// Shape of a stored user as read back from queries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Insert payload for a new record. Omits `id` so the database sequence
/// assigns it.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Changeset replacing the mutable attributes of an existing record.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

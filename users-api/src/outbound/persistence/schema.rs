//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand to match.

diesel::table! {
    /// Users table backing the `/api/users` resource.
    ///
    /// Stores one row per user. The `id` column is assigned by the
    /// database sequence, never by clients.
    users (id) {
        /// Primary key: sequence-assigned 64-bit identifier.
        id -> Int8,
        /// Display name.
        name -> Varchar,
        /// Contact email address.
        email -> Varchar,
    }
}

//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! This adapter implements the domain's `UserRepository` port, translating
//! between Diesel row structs and domain types. Inserts rely on the database
//! sequence for identifier assignment and read the stored record back via
//! `RETURNING`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{SaveUser, UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Wrap `pool` for use behind the repository port.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Fold pool failures into the port's connection error.
fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Translate Diesel failures into the port's error vocabulary.
///
/// Raw driver detail is logged at debug level and replaced with fixed
/// phrases, so SQL fragments never travel beyond this adapter.
fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::NotFound => {
            debug!("no row returned where one was required");
            UserPersistenceError::query("record not found")
        }
        DieselError::QueryBuilderError(reason) => {
            debug!(%reason, "diesel rejected the query");
            UserPersistenceError::query("database query error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "connection dropped mid-operation");
            UserPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "database reported an error");
            UserPersistenceError::query("database error")
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            UserPersistenceError::query("database error")
        }
    }
}

/// Convert a database row to a domain User.
fn row_to_user(row: UserRow) -> User {
    User::new(UserId::new(row.id), row.name, row.email)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.as_i64())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_user))
    }

    async fn save(&self, user: SaveUser<'_>) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = match user {
            SaveUser::New(candidate) => {
                let new_row = NewUserRow {
                    name: &candidate.name,
                    email: &candidate.email,
                };

                diesel::insert_into(users::table)
                    .values(&new_row)
                    .returning(UserRow::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?
            }
            SaveUser::Existing(existing) => {
                let update = UserUpdate {
                    name: &existing.name,
                    email: &existing.email,
                };

                diesel::update(users::table.find(existing.id.as_i64()))
                    .set(&update)
                    .returning(UserRow::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?
            }
        };

        Ok(row_to_user(row))
    }

    async fn delete(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Deleting zero rows is fine: the port treats absent records as a
        // no-op.
        diesel::delete(users::table.find(user.id.as_i64()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

//! Port abstraction for user persistence adapters and their errors.
//!
//! Inbound adapters (HTTP handlers) depend on [`UserRepository`] rather than
//! any concrete store, so production can back it with PostgreSQL while tests
//! run against the in-memory implementation.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

/// Failures reported through the repository port.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// The store could not be reached or a connection handed out.
    #[error("could not reach the user store: {message}")]
    Connection { message: String },

    /// The store failed while executing an operation.
    #[error("user store operation failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
    /// Wrap a connectivity failure.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Wrap an execution failure.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Save input distinguishing first-time inserts from overwrites.
///
/// `New` lets the store assign the identifier; `Existing` replaces the record
/// addressed by the identifier the user already carries.
#[derive(Debug, Clone, Copy)]
pub enum SaveUser<'a> {
    /// Insert a user that has no identifier yet.
    New(&'a NewUser),
    /// Replace the stored record for an identified user.
    Existing(&'a User),
}

/// Port for user storage and retrieval.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every stored user in store-defined order.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Persist a user, returning the stored record with its identifier.
    async fn save(&self, user: SaveUser<'_>) -> Result<User, UserPersistenceError>;

    /// Remove a user record. Removing an absent record is a no-op.
    async fn delete(&self, user: &User) -> Result<(), UserPersistenceError>;
}

/// In-memory repository backing tests and pool-less deployments.
///
/// Identifiers are assigned from a monotonically increasing counter starting
/// at 1, mirroring the database sequence used by the Diesel adapter.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<InMemoryState>,
}

#[derive(Debug)]
struct InMemoryState {
    next_id: i64,
    records: BTreeMap<i64, User>,
}

impl Default for InMemoryState {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: BTreeMap::new(),
        }
    }
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<MutexGuard<'_, InMemoryState>, UserPersistenceError> {
        self.state
            .lock()
            .map_err(|_| UserPersistenceError::query("user store mutex poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.locked()?;
        Ok(state.records.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.locked()?;
        Ok(state.records.get(&id.as_i64()).cloned())
    }

    async fn save(&self, user: SaveUser<'_>) -> Result<User, UserPersistenceError> {
        let mut state = self.locked()?;
        let saved = match user {
            SaveUser::New(candidate) => {
                let id = UserId::new(state.next_id);
                state.next_id += 1;
                User::new(id, candidate.name.clone(), candidate.email.clone())
            }
            SaveUser::Existing(existing) => existing.clone(),
        };
        state.records.insert(saved.id.as_i64(), saved.clone());
        Ok(saved)
    }

    async fn delete(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.locked()?;
        state.records.remove(&user.id.as_i64());
        Ok(())
    }
}

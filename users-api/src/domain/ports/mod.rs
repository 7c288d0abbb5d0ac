//! Ports the domain exposes to its adapters.

mod user_repository;

pub use user_repository::{InMemoryUserRepository, SaveUser, UserPersistenceError, UserRepository};

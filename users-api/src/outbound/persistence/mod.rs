//! PostgreSQL persistence for user records.
//!
//! [`DieselUserRepository`] implements the domain's `UserRepository` port on
//! top of `diesel-async` with a bb8 pool. Row structs and the generated
//! schema stay private to this module; only domain types and the port's
//! error type cross the boundary.
//!
//! # Example
//!
//! ```ignore
//! use users_api::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

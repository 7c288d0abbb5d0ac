//! Dependency wiring for the HTTP handlers.
//!
//! Handlers receive this bundle through `actix_web::web::Data`, so they see
//! the repository port and nothing about where records actually live.

use std::sync::Arc;

use crate::domain::ports::UserRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Repository backing the users resource.
    pub users: Arc<dyn UserRepository>,
}

impl HttpState {
    /// Construct state around a user repository.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use users_api::domain::ports::InMemoryUserRepository;
    /// use users_api::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryUserRepository::new()));
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

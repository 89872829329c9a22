//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch users without
//! importing outbound persistence concerns. Production backs it with
//! [`crate::domain::UserDirectory`].

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for listing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user, ascending by creation time.
    ///
    /// An empty store yields an empty list, not an error.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}

//! Driving port resolving the session attached to a request.

use async_trait::async_trait;

use crate::domain::{Error, Session, UserId};

/// Resolve the session for the user id carried by a session cookie.
///
/// `Ok(None)` means the id no longer names a user; the caller treats the
/// request as anonymous.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve(&self, user_id: &UserId) -> Result<Option<Session>, Error>;
}

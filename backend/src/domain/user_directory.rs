//! User directory domain service.
//!
//! Implements the user-facing driving ports ([`UsersQuery`], [`LoginService`]
//! and [`SessionResolver`]) over a single [`UserRepository`], so every read of
//! user data goes through one place.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{
    LoginService, SessionResolver, UserPersistenceError, UserRepository, UsersQuery,
};
use crate::domain::{
    Error, LoginCredentials, Session, User, UserId, hash_password, verify_password,
};

/// Map persistence failures to domain errors.
pub fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::Duplicate { message } => Error::conflict(message),
    }
}

/// Checks a password against a stored PHC hash.
pub type PasswordVerifier = Arc<dyn Fn(&str, &str) -> bool + Send + Sync>;

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Hash verified for unknown emails so both login paths pay the Argon2 cost.
fn dummy_hash() -> &'static str {
    DUMMY_HASH.get_or_init(|| {
        hash_password("registry-unknown-account").unwrap_or_else(|error| {
            tracing::warn!(%error, "failed to prepare the dummy password hash");
            String::new()
        })
    })
}

/// Domain service backing user listing, login and session resolution.
#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<dyn UserRepository>,
    verifier: PasswordVerifier,
}

impl UserDirectory {
    /// Create a directory over the given repository, verifying with Argon2.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self::with_verifier(users, Arc::new(verify_password))
    }

    /// Create a directory with a custom password verifier.
    pub fn with_verifier(users: Arc<dyn UserRepository>, verifier: PasswordVerifier) -> Self {
        Self { users, verifier }
    }
}

#[async_trait]
impl UsersQuery for UserDirectory {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let mut users = self
            .users
            .list_by_creation()
            .await
            .map_err(map_user_persistence_error)?;
        // Stable: adapters already order, ties keep storage order.
        users.sort_by_key(User::created_at);
        Ok(users)
    }
}

#[async_trait]
impl LoginService for UserDirectory {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let stored = self
            .users
            .find_credentials(credentials.email())
            .await
            .map_err(map_user_persistence_error)?;

        // Unknown emails still verify, against a dummy hash, so response time
        // does not reveal which accounts exist.
        let hash = stored.as_ref().map(|entry| entry.password_hash.clone());
        let password = Zeroizing::new(credentials.password().to_owned());
        let verifier = Arc::clone(&self.verifier);
        let verified = tokio::task::spawn_blocking(move || {
            let hash = hash.as_deref().unwrap_or_else(|| dummy_hash());
            verifier(hash, &password)
        })
        .await
        .map_err(|err| Error::internal(format!("password verification aborted: {err}")))?;

        match stored {
            Some(entry) if verified => Ok(*entry.user.id()),
            Some(_) => Err(Error::unauthorized("invalid credentials")),
            None => {
                tracing::debug!("login attempt for unknown email");
                Err(Error::unauthorized("invalid credentials"))
            }
        }
    }
}

#[async_trait]
impl SessionResolver for UserDirectory {
    async fn resolve(&self, user_id: &UserId) -> Result<Option<Session>, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?;
        Ok(user.as_ref().map(Session::for_user))
    }
}

//! Process-local `UserRepository` used by development servers and tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserCredentials, UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserId};

/// Users kept in insertion order behind a mutex.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<UserCredentials>>,
}

impl InMemoryUserRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `users`, kept in the given order.
    pub fn with_users(users: impl IntoIterator<Item = UserCredentials>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().collect()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<UserCredentials>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User, password_hash: &str) -> Result<(), UserPersistenceError> {
        let mut users = self.lock()?;
        if users
            .iter()
            .any(|stored| stored.user.email() == user.email() || stored.user.id() == user.id())
        {
            return Err(UserPersistenceError::duplicate(user.email().as_ref()));
        }
        users.push(UserCredentials {
            user: user.clone(),
            password_hash: password_hash.to_owned(),
        });
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|stored| stored.user.id() == id)
            .map(|stored| stored.user.clone()))
    }

    async fn find_credentials(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|stored| stored.user.email() == email)
            .cloned())
    }

    async fn list_by_creation(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut users: Vec<User> = self
            .lock()?
            .iter()
            .map(|stored| stored.user.clone())
            .collect();
        users.sort_by_key(User::created_at);
        Ok(users)
    }
}

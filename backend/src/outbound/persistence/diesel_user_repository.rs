//! PostgreSQL-backed `UserRepository` adapter.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserCredentials, UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, EmailAddress, User, UserId, UserRole};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, map_write_diesel_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user persistence port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_write_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
        UserPersistenceError::duplicate,
    )
}

fn map_read_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let corrupt = |field: &str, err: &dyn std::fmt::Display| {
        debug!(id = %row.id, field, %err, "stored user row failed validation");
        UserPersistenceError::query(format!("invalid stored user {field}"))
    };
    let email = EmailAddress::new(&row.email).map_err(|err| corrupt("email", &err))?;
    let name = DisplayName::new(&row.display_name).map_err(|err| corrupt("name", &err))?;
    let role: UserRole = row.role.parse().map_err(|err| corrupt("role", &err))?;
    Ok(User::new(
        UserId::from_uuid(row.id),
        email,
        name,
        role,
        row.created_at,
    ))
}

type UsersByCreation = diesel::dsl::Order<
    diesel::dsl::Select<users::table, diesel::dsl::AsSelect<UserRow, Pg>>,
    diesel::dsl::Asc<users::created_at>,
>;

/// Ascending creation-time listing of users.
fn users_by_creation() -> UsersByCreation {
    users::table
        .select(UserRow::as_select())
        .order_by(users::created_at.asc())
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User, password_hash: &str) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            display_name: user.name().as_ref(),
            role: user.role().as_str(),
            password_hash,
            created_at: user.created_at(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_credentials(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<(UserRow, String)> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select((UserRow::as_select(), users::password_hash))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;
        row.map(|(user, password_hash)| {
            Ok(UserCredentials {
                user: row_to_user(user)?,
                password_hash,
            })
        })
        .transpose()
    }

    async fn list_by_creation(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users_by_creation()
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;
        rows.into_iter().map(row_to_user).collect()
    }
}

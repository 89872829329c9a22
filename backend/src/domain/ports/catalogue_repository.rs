//! Port for catalogue persistence, generic over the entity kind.
//!
//! One trait serves all five kinds; adapters implement it once per marker
//! type (or generically, as the in-memory adapter does).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalogue::{CatalogueEntity, EntityValues, RecordOf};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue repositories.
    pub enum CatalogueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "catalogue connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "catalogue query failed: {message}",
        /// A unique column (name or code) already holds the value.
        Duplicate { message: String } =>
            "catalogue record already exists: {message}",
    }
}

/// CRUD storage for catalogue records of kind `E`.
#[async_trait]
pub trait CatalogueRepository<E: CatalogueEntity>: Send + Sync {
    /// Every record, ascending by creation time.
    async fn list(&self) -> Result<Vec<RecordOf<E>>, CatalogueRepositoryError>;

    /// A single record by id.
    async fn find(&self, id: Uuid) -> Result<Option<RecordOf<E>>, CatalogueRepositoryError>;

    /// Store validated values under a fresh id.
    async fn create(&self, values: EntityValues<E>) -> Result<RecordOf<E>, CatalogueRepositoryError>;

    /// Overwrite the values of an existing record. `None` when the id is unknown.
    async fn replace(
        &self,
        id: Uuid,
        values: EntityValues<E>,
    ) -> Result<Option<RecordOf<E>>, CatalogueRepositoryError>;

    /// Remove a record. `false` when the id is unknown.
    async fn delete(&self, id: Uuid) -> Result<bool, CatalogueRepositoryError>;
}

//! Catalogue domain service.
//!
//! Validates payloads through each kind's create schema and maps repository
//! failures to domain errors. HTTP handlers are generic over the kind and
//! pick the matching service from [`CatalogueServices`].

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Error;
use crate::domain::catalogue::{
    CatalogueEntity, Diploma, Division, ExaminationCenter, Grade, RecordOf, ReleaseType,
};
use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};
use crate::domain::schema::Schema;

/// Raw create/replace payload for entity `E`.
pub type EntityInput<E> = <<E as CatalogueEntity>::Create as Schema>::Input;

fn map_repository_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalogue unavailable: {message}"))
        }
        CatalogueRepositoryError::Query { message } => {
            Error::internal(format!("catalogue error: {message}"))
        }
        CatalogueRepositoryError::Duplicate { message } => Error::conflict(message),
    }
}

/// CRUD use-cases for one catalogue kind.
pub struct CatalogueService<E: CatalogueEntity> {
    repository: Arc<dyn CatalogueRepository<E>>,
}

impl<E: CatalogueEntity> Clone for CatalogueService<E> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<E: CatalogueEntity> CatalogueService<E> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<dyn CatalogueRepository<E>>) -> Self {
        Self { repository }
    }

    fn not_found(id: Uuid) -> Error {
        Error::not_found(format!("{} {id} not found", E::KIND))
    }

    fn validate(input: EntityInput<E>) -> Result<<E::Create as Schema>::Value, Error> {
        E::Create::parse(input).map_err(|errors| {
            match serde_json::to_value(&errors) {
                Ok(details) => {
                    Error::invalid_request(format!("invalid {}", E::KIND)).with_details(details)
                }
                Err(err) => Error::internal(format!("failed to format validation errors: {err}")),
            }
        })
    }

    /// Every record, ascending by creation time.
    pub async fn list(&self) -> Result<Vec<RecordOf<E>>, Error> {
        self.repository.list().await.map_err(map_repository_error)
    }

    /// A single record, or `not_found`.
    pub async fn get(&self, id: Uuid) -> Result<RecordOf<E>, Error> {
        self.repository
            .find(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Validate and store a new record.
    pub async fn create(&self, input: EntityInput<E>) -> Result<RecordOf<E>, Error> {
        let values = Self::validate(input)?;
        let record = self
            .repository
            .create(values)
            .await
            .map_err(map_repository_error)?;
        tracing::info!(kind = %E::KIND, id = %record.id, "catalogue record created");
        Ok(record)
    }

    /// Validate and overwrite an existing record.
    pub async fn replace(&self, id: Uuid, input: EntityInput<E>) -> Result<RecordOf<E>, Error> {
        let values = Self::validate(input)?;
        let record = self
            .repository
            .replace(id, values)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Self::not_found(id))?;
        tracing::info!(kind = %E::KIND, %id, "catalogue record replaced");
        Ok(record)
    }

    /// Remove a record, or `not_found`.
    pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
        if self
            .repository
            .delete(id)
            .await
            .map_err(map_repository_error)?
        {
            tracing::info!(kind = %E::KIND, %id, "catalogue record deleted");
            Ok(())
        } else {
            Err(Self::not_found(id))
        }
    }
}

/// One service per catalogue kind.
#[derive(Clone)]
pub struct CatalogueServices {
    pub diplomas: CatalogueService<Diploma>,
    pub divisions: CatalogueService<Division>,
    pub examination_centers: CatalogueService<ExaminationCenter>,
    pub grades: CatalogueService<Grade>,
    pub release_types: CatalogueService<ReleaseType>,
}

impl CatalogueServices {
    /// The service for kind `E`.
    pub fn get<E: ServedEntity>(&self) -> &CatalogueService<E> {
        E::service(self)
    }
}

/// Catalogue kinds with a slot in [`CatalogueServices`].
pub trait ServedEntity: CatalogueEntity + Sized {
    fn service(services: &CatalogueServices) -> &CatalogueService<Self>;
}

macro_rules! served_entity {
    ($($entity:ty => $field:ident),* $(,)?) => {
        $(
            impl ServedEntity for $entity {
                fn service(services: &CatalogueServices) -> &CatalogueService<Self> {
                    &services.$field
                }
            }
        )*
    };
}

served_entity! {
    Diploma => diplomas,
    Division => divisions,
    ExaminationCenter => examination_centers,
    Grade => grades,
    ReleaseType => release_types,
}

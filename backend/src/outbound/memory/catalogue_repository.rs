//! Process-local `CatalogueRepository` for any catalogue kind.

use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::catalogue::{CatalogueEntity, CatalogueRecord, EntityValues, RecordOf};
use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};

/// Records of kind `E` in creation order.
pub struct InMemoryCatalogueRepository<E: CatalogueEntity> {
    records: Mutex<Vec<RecordOf<E>>>,
    _kind: PhantomData<fn() -> E>,
}

impl<E: CatalogueEntity> Default for InMemoryCatalogueRepository<E> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            _kind: PhantomData,
        }
    }
}

impl<E: CatalogueEntity> InMemoryCatalogueRepository<E> {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<RecordOf<E>>>, CatalogueRepositoryError> {
        self.records
            .lock()
            .map_err(|_| CatalogueRepositoryError::query("catalogue store lock poisoned"))
    }

    fn ensure_unique(
        records: &[RecordOf<E>],
        values: &EntityValues<E>,
        except: Option<Uuid>,
    ) -> Result<(), CatalogueRepositoryError> {
        let key = E::unique_key(values);
        let clash = records
            .iter()
            .filter(|record| Some(record.id) != except)
            .any(|record| E::unique_key(&record.values) == key);
        if clash {
            Err(CatalogueRepositoryError::duplicate(format!(
                "{} {key} already exists",
                E::KIND
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl<E: CatalogueEntity> CatalogueRepository<E> for InMemoryCatalogueRepository<E> {
    async fn list(&self) -> Result<Vec<RecordOf<E>>, CatalogueRepositoryError> {
        Ok(self.lock()?.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<RecordOf<E>>, CatalogueRepositoryError> {
        Ok(self.lock()?.iter().find(|record| record.id == id).cloned())
    }

    async fn create(&self, values: EntityValues<E>) -> Result<RecordOf<E>, CatalogueRepositoryError> {
        let mut records = self.lock()?;
        Self::ensure_unique(&records, &values, None)?;
        let record = CatalogueRecord::new(Uuid::new_v4(), Utc::now(), values);
        records.push(record.clone());
        Ok(record)
    }

    async fn replace(
        &self,
        id: Uuid,
        values: EntityValues<E>,
    ) -> Result<Option<RecordOf<E>>, CatalogueRepositoryError> {
        let mut records = self.lock()?;
        if !records.iter().any(|record| record.id == id) {
            return Ok(None);
        }
        Self::ensure_unique(&records, &values, Some(id))?;
        Ok(records
            .iter_mut()
            .find(|record| record.id == id)
            .map(|record| {
                record.values = values;
                record.clone()
            }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogueRepositoryError> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|record| record.id != id);
        Ok(records.len() != before)
    }
}

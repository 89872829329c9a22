//! In-memory adapters for the persistence ports.
//!
//! Used when the server runs without a database URL and by tests that need
//! real port behaviour without PostgreSQL.

mod catalogue_repository;
mod user_repository;

pub use catalogue_repository::InMemoryCatalogueRepository;
pub use user_repository::InMemoryUserRepository;

use std::sync::Arc;

use crate::domain::{CatalogueService, CatalogueServices};

/// Catalogue services backed by fresh in-memory repositories.
pub fn in_memory_catalogue() -> CatalogueServices {
    CatalogueServices {
        diplomas: CatalogueService::new(Arc::new(InMemoryCatalogueRepository::new())),
        divisions: CatalogueService::new(Arc::new(InMemoryCatalogueRepository::new())),
        examination_centers: CatalogueService::new(Arc::new(InMemoryCatalogueRepository::new())),
        grades: CatalogueService::new(Arc::new(InMemoryCatalogueRepository::new())),
        release_types: CatalogueService::new(Arc::new(InMemoryCatalogueRepository::new())),
    }
}

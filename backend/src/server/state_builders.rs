//! Builders wiring port implementations into [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use exam_registry::domain::catalogue::{Diploma, Division, ExaminationCenter, Grade, ReleaseType};
use exam_registry::domain::ports::UserRepository;
use exam_registry::domain::{CatalogueService, CatalogueServices, UserDirectory};
use exam_registry::inbound::http::state::{HttpState, HttpStatePorts};
use exam_registry::outbound::memory::{InMemoryUserRepository, in_memory_catalogue};
use exam_registry::outbound::persistence::{DbPool, DieselCatalogueRepository, DieselUserRepository};
use tracing::{info, warn};

use super::ServerConfig;

fn ports_over(users: Arc<dyn UserRepository>) -> HttpStatePorts {
    let directory = Arc::new(UserDirectory::new(users));
    HttpStatePorts {
        login: directory.clone(),
        users: directory.clone(),
        sessions: directory,
    }
}

fn diesel_catalogue(pool: &DbPool) -> CatalogueServices {
    let repository = Arc::new(DieselCatalogueRepository::new(pool.clone()));
    CatalogueServices {
        diplomas: CatalogueService::<Diploma>::new(repository.clone()),
        divisions: CatalogueService::<Division>::new(repository.clone()),
        examination_centers: CatalogueService::<ExaminationCenter>::new(repository.clone()),
        grades: CatalogueService::<Grade>::new(repository.clone()),
        release_types: CatalogueService::<ReleaseType>::new(repository),
    }
}

/// Build HTTP state from the configured persistence.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL adapters");
            HttpState::new(
                ports_over(Arc::new(DieselUserRepository::new(pool.clone()))),
                diesel_catalogue(pool),
            )
        }
        None => {
            warn!("no database configured; using in-memory adapters");
            HttpState::new(
                ports_over(Arc::new(InMemoryUserRepository::new())),
                in_memory_catalogue(),
            )
        }
    };
    web::Data::new(state)
}

//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::CatalogueServices;
use crate::domain::ports::{LoginService, SessionResolver, UsersQuery};

/// Parameter object bundling the user-facing port implementations.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub sessions: Arc<dyn SessionResolver>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub sessions: Arc<dyn SessionResolver>,
    pub catalogue: CatalogueServices,
}

impl HttpState {
    /// Construct state from the user ports and the catalogue services.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use exam_registry::domain::UserDirectory;
    /// use exam_registry::inbound::http::state::{HttpState, HttpStatePorts};
    /// use exam_registry::outbound::memory::{InMemoryUserRepository, in_memory_catalogue};
    ///
    /// let directory = Arc::new(UserDirectory::new(Arc::new(InMemoryUserRepository::new())));
    /// let ports = HttpStatePorts {
    ///     login: directory.clone(),
    ///     users: directory.clone(),
    ///     sessions: directory,
    /// };
    /// let state = HttpState::new(ports, in_memory_catalogue());
    /// let _users = state.users.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, catalogue: CatalogueServices) -> Self {
        let HttpStatePorts {
            login,
            users,
            sessions,
        } = ports;
        Self {
            login,
            users,
            sessions,
            catalogue,
        }
    }
}

//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod catalogue_repository;
mod login_service;
mod session_resolver;
mod user_repository;
mod users_query;

pub use catalogue_repository::{CatalogueRepository, CatalogueRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use session_resolver::MockSessionResolver;
pub use session_resolver::SessionResolver;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserCredentials, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;

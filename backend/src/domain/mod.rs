//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers, the ports adapters plug into, and the services that
//! implement the driving ports. Keep types immutable and document invariants
//! and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User / UserRole: registry user and its `USER | ADMIN` role.
//! - Session: resolved identity for one request.
//! - catalogue: the five reference entity kinds and their schemas.

pub mod auth;
pub mod catalogue;
pub mod catalogue_service;
pub mod error;
pub mod ports;
pub mod schema;
pub mod session;
pub mod trace_id;
pub mod user;
pub mod user_directory;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PasswordHashError, hash_password, verify_password,
};
pub use self::catalogue_service::{CatalogueService, CatalogueServices, EntityInput, ServedEntity};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::session::{Session, SessionUser};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DisplayName, EmailAddress, User, UserId, UserRole, UserValidationError};
pub use self::user_directory::{UserDirectory, map_user_persistence_error};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use exam_registry::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

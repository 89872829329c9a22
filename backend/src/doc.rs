//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP path (session, users, the five catalogue
//! kinds and health checks) plus the session cookie security scheme. Swagger
//! UI serves it in debug builds and `openapi-dump` prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Session, SessionUser, User, UserRole};
use crate::inbound::http::catalogue::{
    diplomas, divisions, examination_centers, grades, release_types,
};
use crate::inbound::http::users::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Exam registry API",
        description = "Session-authenticated access to users and the examinations catalogue."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_session,
        crate::inbound::http::users::list_users,
        diplomas::list,
        diplomas::read,
        diplomas::create,
        diplomas::replace,
        diplomas::delete,
        divisions::list,
        divisions::read,
        divisions::create,
        divisions::replace,
        divisions::delete,
        examination_centers::list,
        examination_centers::read,
        examination_centers::create,
        examination_centers::replace,
        examination_centers::delete,
        grades::list,
        grades::read,
        grades::create,
        grades::replace,
        grades::delete,
        release_types::list,
        release_types::read,
        release_types::create,
        release_types::replace,
        release_types::delete,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Error, ErrorCode, User, UserRole, Session, SessionUser, LoginRequest)),
    tags(
        (name = "session", description = "Login, logout and the current session"),
        (name = "users", description = "User directory (administrators only)"),
        (name = "diplomas", description = "Diploma catalogue"),
        (name = "divisions", description = "Division catalogue"),
        (name = "examination-centers", description = "Examination center catalogue"),
        (name = "grades", description = "Grade catalogue"),
        (name = "release-types", description = "Release type catalogue"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::domain::ports::{MockLoginService, MockUsersQuery, SessionResolver};
use crate::domain::{DisplayName, EmailAddress, Error, Session, User, UserId, UserRole};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::in_memory_catalogue;

pub const SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Ports whose login and users mocks fail the test if they are ever called.
pub fn ports_with_sessions(sessions: Arc<dyn SessionResolver>) -> HttpStatePorts {
    HttpStatePorts {
        login: Arc::new(MockLoginService::new()),
        users: Arc::new(MockUsersQuery::new()),
        sessions,
    }
}

/// Wrap ports together with empty in-memory catalogue services.
pub fn http_state(ports: HttpStatePorts) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(ports, in_memory_catalogue()))
}

/// Route handler writing the user id from the path into the session cookie.
///
/// Mount it at `/test/sign-in/{id}` to obtain a signed-in cookie without
/// going through the login endpoint.
pub async fn sign_in(
    id: web::Path<Uuid>,
    session: SessionContext,
) -> Result<HttpResponse, Error> {
    session.persist_user(&UserId::from_uuid(id.into_inner()))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Extract the session cookie set by a response.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .expect("session cookie set")
        .into_owned()
}

/// A stored user with the given role and a fixed creation time.
pub fn user_with_role(role: UserRole) -> User {
    let created_at = Utc
        .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp");
    User::new(
        UserId::random(),
        EmailAddress::new("grace@example.org").expect("valid email"),
        DisplayName::new("Grace Hopper").expect("valid name"),
        role,
        created_at,
    )
}

/// Session resolved for a user with the given role.
pub fn session_with_role(role: UserRole) -> Session {
    Session::for_user(&user_with_role(role))
}

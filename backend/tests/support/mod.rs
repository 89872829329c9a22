//! Shared harness for the HTTP integration suites.
//!
//! Builds the registry API over in-memory adapters with a seeded user store,
//! mounted the same way the server binary mounts it.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use exam_registry::Trace;
use exam_registry::domain::ports::{SessionResolver, UserRepository};
use exam_registry::domain::{
    DisplayName, EmailAddress, Error, Session, User, UserDirectory, UserId, UserRole,
    hash_password,
};
use exam_registry::inbound::http::catalogue;
use exam_registry::inbound::http::state::{HttpState, HttpStatePorts};
use exam_registry::inbound::http::users::{current_session, list_users, login, logout};
use exam_registry::outbound::memory::{InMemoryUserRepository, in_memory_catalogue};
use serde_json::json;

pub const PASSWORD: &str = "correct horse battery staple";
pub const ADMIN_EMAIL: &str = "grace@example.org";
pub const USER_EMAIL: &str = "ada@example.org";

/// Session resolver that counts how often it is asked.
pub struct CountingResolver {
    inner: Arc<dyn SessionResolver>,
    calls: AtomicUsize,
}

impl CountingResolver {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionResolver for CountingResolver {
    async fn resolve(&self, user_id: &UserId) -> Result<Option<Session>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(user_id).await
    }
}

pub struct Registry {
    pub state: web::Data<HttpState>,
    pub resolver: Arc<CountingResolver>,
}

fn user(email: &str, name: &str, role: UserRole, minute: u32) -> User {
    User::new(
        UserId::random(),
        EmailAddress::new(email).expect("email"),
        DisplayName::new(name).expect("name"),
        role,
        Utc.with_ymd_and_hms(2024, 3, 1, 9, minute, 0)
            .single()
            .expect("timestamp"),
    )
}

/// Registry state with an admin and a regular user, inserted newest first.
pub async fn seeded_registry() -> Registry {
    let repository = Arc::new(InMemoryUserRepository::new());
    let hash = hash_password(PASSWORD).expect("hash");
    for seeded in [
        user(USER_EMAIL, "Ada Lovelace", UserRole::User, 45),
        user(ADMIN_EMAIL, "Grace Hopper", UserRole::Admin, 15),
    ] {
        repository.insert(&seeded, &hash).await.expect("insert");
    }

    let directory = Arc::new(UserDirectory::new(repository));
    let resolver = Arc::new(CountingResolver {
        inner: directory.clone(),
        calls: AtomicUsize::new(0),
    });
    let ports = HttpStatePorts {
        login: directory.clone(),
        users: directory,
        sessions: resolver.clone(),
    };
    Registry {
        state: web::Data::new(HttpState::new(ports, in_memory_catalogue())),
        resolver,
    }
}

/// The `/api/v1` scope with session middleware, plus any extra routes.
pub fn registry_app<F>(
    state: web::Data<HttpState>,
    extra: F,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    F: FnOnce(&mut web::ServiceConfig),
{
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .build();
    App::new().app_data(state).wrap(Trace).service(
        web::scope("/api/v1")
            .wrap(session)
            .service(login)
            .service(logout)
            .service(current_session)
            .service(list_users)
            .configure(catalogue::configure)
            .configure(extra),
    )
}

/// Log in and return the session cookie.
pub async fn login_as<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"email": email, "password": PASSWORD}))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login failed for {email}");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

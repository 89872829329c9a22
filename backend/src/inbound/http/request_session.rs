//! Per-request memoised session resolution.
//!
//! [`SessionAccessor`] turns the session cookie into a [`Session`] at most
//! once per request. The cache lives in the request extensions, so every
//! extractor in the same request shares it and it is dropped with the
//! request. Nothing is cached across requests.

use std::rc::Rc;
use std::sync::Arc;

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::domain::ports::SessionResolver;
use crate::domain::{Error, Session, UserId};

use super::session::SessionContext;
use super::state::HttpState;

#[derive(Default)]
struct SessionCache {
    resolved: OnceCell<Option<Session>>,
}

/// Request-scoped handle resolving the current session lazily.
#[derive(Clone)]
pub struct SessionAccessor {
    cache: Rc<SessionCache>,
    user_id: Option<UserId>,
    resolver: Arc<dyn SessionResolver>,
}

impl SessionAccessor {
    /// Resolve the session for this request.
    ///
    /// The first call asks the resolver; later calls in the same request
    /// return the stored value. A failed resolution is returned unchanged and
    /// is not stored, so a later call retries it.
    pub async fn session(&self) -> Result<Option<Session>, Error> {
        let Some(user_id) = self.user_id else {
            return Ok(None);
        };
        let resolved = self
            .cache
            .resolved
            .get_or_try_init(|| async {
                debug!(%user_id, "resolving session");
                self.resolver.resolve(&user_id).await
            })
            .await?;
        Ok(resolved.clone())
    }

    /// Resolve the session or fail with `401 Unauthorized`.
    pub async fn require_session(&self) -> Result<Session, Error> {
        self.session()
            .await?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

fn request_cache(req: &HttpRequest) -> Rc<SessionCache> {
    let cached = req.extensions().get::<Rc<SessionCache>>().cloned();
    if let Some(cache) = cached {
        return cache;
    }
    let cache = Rc::new(SessionCache::default());
    req.extensions_mut().insert(Rc::clone(&cache));
    cache
}

impl FromRequest for SessionAccessor {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let resolver = req
            .app_data::<web::Data<HttpState>>()
            .map(|state| Arc::clone(&state.sessions));
        let cache = request_cache(req);
        let context = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let resolver = resolver.ok_or_else(|| Error::internal("HTTP state not configured"))?;
            let user_id = context.await?.user_id()?;
            Ok(Self {
                cache,
                user_id,
                resolver,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::domain::ports::MockSessionResolver;
    use crate::inbound::http::test_utils::{
        http_state, ports_with_sessions, session_cookie, session_with_role, sign_in,
        test_session_middleware,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};
    use rstest::rstest;

    const SIGNED_IN_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn resolve_repeatedly(
        first: SessionAccessor,
        second: SessionAccessor,
    ) -> Result<HttpResponse, Error> {
        let initial = first.session().await?;
        let again = first.session().await?;
        let shared = second.session().await?;
        assert_eq!(initial, again);
        assert_eq!(initial, shared);
        Ok(HttpResponse::Ok().json(initial))
    }

    fn resolver_expecting(calls: usize) -> MockSessionResolver {
        let session = session_with_role(UserRole::User);
        let mut resolver = MockSessionResolver::new();
        resolver
            .expect_resolve()
            .times(calls)
            .returning(move |_| Ok(Some(session.clone())));
        resolver
    }

    macro_rules! accessor_app {
        ($resolver:expr) => {
            test::init_service(
                App::new()
                    .app_data(http_state(ports_with_sessions(Arc::new($resolver))))
                    .wrap(test_session_middleware())
                    .route("/test/sign-in/{id}", web::post().to(sign_in))
                    .route("/resolve", web::get().to(resolve_repeatedly)),
            )
            .await
        };
    }

    #[rstest]
    #[actix_web::test]
    async fn resolves_once_within_a_request() {
        let app = accessor_app!(resolver_expecting(1));
        let signed_in = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/test/sign-in/{SIGNED_IN_ID}"))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&signed_in);

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/resolve").cookie(cookie).to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["user"]["role"], "USER");
    }

    #[rstest]
    #[actix_web::test]
    async fn resolves_once_per_request() {
        let app = accessor_app!(resolver_expecting(2));
        let signed_in = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/test/sign-in/{SIGNED_IN_ID}"))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&signed_in);

        for _ in 0..2 {
            let response = test::call_service(
                &app,
                test::TestRequest::get()
                    .uri("/resolve")
                    .cookie(cookie.clone())
                    .to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_requests_skip_resolution() {
        let mut resolver = MockSessionResolver::new();
        resolver.expect_resolve().never();
        let app = accessor_app!(resolver);

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/resolve").to_request()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert!(body.is_null());
    }

    #[rstest]
    #[actix_web::test]
    async fn resolver_failures_propagate() {
        let mut resolver = MockSessionResolver::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(|_| Err(Error::service_unavailable("user store unavailable")));
        let app = test::init_service(
            App::new()
                .app_data(http_state(ports_with_sessions(Arc::new(resolver))))
                .wrap(test_session_middleware())
                .route("/test/sign-in/{id}", web::post().to(sign_in))
                .route(
                    "/require",
                    web::get().to(|accessor: SessionAccessor| async move {
                        accessor.require_session().await?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;
        let signed_in = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/test/sign-in/{SIGNED_IN_ID}"))
                .to_request(),
        )
        .await;

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(session_cookie(&signed_in))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_users_are_unauthorised() {
        let mut resolver = MockSessionResolver::new();
        resolver.expect_resolve().times(1).returning(|_| Ok(None));
        let app = test::init_service(
            App::new()
                .app_data(http_state(ports_with_sessions(Arc::new(resolver))))
                .wrap(test_session_middleware())
                .route("/test/sign-in/{id}", web::post().to(sign_in))
                .route(
                    "/require",
                    web::get().to(|accessor: SessionAccessor| async move {
                        accessor.require_session().await?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;
        let signed_in = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/test/sign-in/{SIGNED_IN_ID}"))
                .to_request(),
        )
        .await;

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(session_cookie(&signed_in))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

//! Role gates used by HTTP handlers.
//!
//! Handlers declare their access requirement by taking [`CurrentSession`]
//! (any signed-in user) or [`AdminSession`] (`ADMIN` role only) as an
//! argument. Both resolve through the request's [`SessionAccessor`], so a
//! handler combining them still resolves the session once.

use std::ops::Deref;

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, Session};

use super::request_session::SessionAccessor;

/// Session of a signed-in user; anonymous requests get `401`.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

/// Session of an administrator; anonymous requests get `401`, other roles
/// get `403`.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

impl Deref for CurrentSession {
    type Target = Session;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for AdminSession {
    type Target = Session;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Reject sessions lacking the `ADMIN` role.
pub fn require_admin(session: Session) -> Result<Session, Error> {
    if session.is_admin() {
        Ok(session)
    } else {
        debug!(user_id = %session.user.id, role = %session.role(), "admin role required");
        Err(Error::forbidden("administrator role required"))
    }
}

impl FromRequest for CurrentSession {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let accessor = SessionAccessor::from_request(req, payload);
        Box::pin(async move {
            let session = accessor.await?.require_session().await?;
            Ok(Self(session))
        })
    }
}

impl FromRequest for AdminSession {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let accessor = SessionAccessor::from_request(req, payload);
        Box::pin(async move {
            let session = accessor.await?.require_session().await?;
            Ok(Self(require_admin(session)?))
        })
    }
}

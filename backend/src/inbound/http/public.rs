//! Layout for routes reachable without a session.
//!
//! The layout is a passthrough: it mounts its children inside a plain scope
//! and adds no guards, extractors or middleware of its own.

use actix_web::{Scope, web};

/// Wrap `routes` in the public layout mounted at `prefix`.
///
/// # Examples
/// ```
/// use actix_web::{App, HttpResponse, web};
/// use exam_registry::inbound::http::public::public_layout;
///
/// let app = App::new().service(public_layout("", |cfg| {
///     cfg.route("/hello", web::get().to(|| async { HttpResponse::Ok() }));
/// }));
/// ```
pub fn public_layout<F>(prefix: &str, routes: F) -> Scope
where
    F: FnOnce(&mut web::ServiceConfig),
{
    // Shared public header goes here once there is one.
    web::scope(prefix).configure(routes)
}

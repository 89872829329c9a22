//! Exam registry backend library.
//!
//! Hexagonal layout: [`domain`] holds entities, schemas, ports and services;
//! [`inbound`] adapts HTTP requests onto them; [`outbound`] implements the
//! ports over PostgreSQL or process memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

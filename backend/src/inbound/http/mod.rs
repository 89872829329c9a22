//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod catalogue;
pub mod error;
pub mod health;
pub mod public;
pub mod request_session;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

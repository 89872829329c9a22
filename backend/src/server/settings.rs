//! Server settings loaded via OrthoConfig.
//!
//! Values come from `REGISTRY_*` environment variables, matching CLI flags or
//! a configuration file. Without a database URL the server runs on in-memory
//! adapters.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Configuration values controlling the HTTP server and persistence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct ServerSettings {
    /// Socket address to bind; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Minimum idle pooled connections.
    pub pool_min_idle: Option<u32>,
    /// Apply pending migrations before serving; defaults to `true`.
    pub run_migrations: Option<bool>,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(SocketAddr::V4(SocketAddrV4::new(
            Ipv4Addr::UNSPECIFIED,
            DEFAULT_PORT,
        )))
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

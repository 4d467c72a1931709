use serde::Deserialize;

use portal_core::config::Config;

/// Portal service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct PortalConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3120). Env var: `PORTAL_PORT`.
    #[serde(default = "default_port")]
    pub portal_port: u16,
    /// Upper bound of the database connection pool (default 10).
    /// Env var: `PORTAL_MAX_CONNECTIONS`.
    #[serde(default = "default_max_connections")]
    pub portal_max_connections: u32,
}

fn default_port() -> u16 {
    3120
}

fn default_max_connections() -> u32 {
    10
}

impl Config for PortalConfig {}

//! Process configuration.
//!
//! All three settings can come from flags or the environment, with the
//! environment matching what the deployment supplies
//! (`DATABASE_URL`, `BIND_ADDR`, `CORS_ALLOWED_ORIGIN`).

use std::net::SocketAddr;

use clap::Parser;

/// Startup configuration for the archive server.
#[derive(Debug, Clone, Parser)]
#[command(name = "shelfmark", about = "Document-archive record keeper", version)]
pub struct ServerConfig {
    /// SQLite database path; created and migrated on first start.
    #[arg(long, env = "DATABASE_URL", default_value = "shelfmark.db")]
    pub database_url: String,

    /// Socket address to serve on.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind_addr: SocketAddr,

    /// The one origin allowed to make cross-origin requests.
    #[arg(long, env = "CORS_ALLOWED_ORIGIN", default_value = "http://localhost:5173")]
    pub allowed_origin: String,
}

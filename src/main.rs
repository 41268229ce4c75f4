//! Binary entry-point: wires configuration, tracing, the store, and the
//! HTTP server.

use std::sync::Arc;

use actix_web::{HttpServer, web};
use clap::Parser;
use color_eyre::eyre::WrapErr;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use shelfmark::inbound::http::state::HttpState;
use shelfmark::outbound::persistence::{DbPool, DieselDocumentRepository, PoolConfig};
use shelfmark::server::{ServerConfig, build_app};

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::parse();

    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .wrap_err("failed to open the document store")?;
    let state = web::Data::new(HttpState::new(Arc::new(DieselDocumentRepository::new(pool))));

    info!(addr = %config.bind_addr, db = %config.database_url, "starting archive server");

    let allowed_origin = config.allowed_origin.clone();
    HttpServer::new(move || build_app(state.clone(), &allowed_origin))
        .bind(config.bind_addr)?
        .run()
        .await?;

    Ok(())
}

//! HTTP server command
//!
//! Connects, brings the schema up to date, then serves until Ctrl+C or
//! SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use gigboard_server::db::{create_pool_with_options, migrations};
use gigboard_server::http::{run_server, ServerConfig};

use crate::config::AppConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides GIGBOARD_BIND and config; default: 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides DATABASE_URL and config)
    #[arg(long)]
    pub database_url: Option<String>,
}

impl ServeArgs {
    /// Flags win over everything already resolved into `config`.
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
        config.server.cors_permissive |= self.cors_permissive;
        config
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: AppConfig) -> Result<()> {
    let config = args.apply(config);

    tracing::info!("Starting gigboard server on {}", config.server.bind);

    let pool = create_pool_with_options(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    let server_config = ServerConfig {
        bind_addr: config.server.bind,
        cors_permissive: config.server.cors_permissive,
    };

    // Blocks until shutdown
    run_server(pool, server_config)
        .await
        .context("Server error")?;

    Ok(())
}

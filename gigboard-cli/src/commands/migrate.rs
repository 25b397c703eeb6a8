//! Create the schema without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use gigboard_server::db::{create_pool_with_options, migrations};

use crate::config::AppConfig;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides DATABASE_URL and config)
    #[arg(long)]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs, config: AppConfig) -> Result<()> {
    let url = args.database_url.unwrap_or(config.database.url);

    let pool = create_pool_with_options(&url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    println!("Schema is up to date");
    Ok(())
}

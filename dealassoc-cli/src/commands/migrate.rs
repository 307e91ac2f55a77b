//! Schema command: create the associations table and exit

use anyhow::{Context, Result};
use clap::Parser;

use dealassoc_server::PgAssociationRepository;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    // Schema setup needs a single connection
    let repo = PgAssociationRepository::connect(&database_url, 1)
        .await
        .context("Failed to create database pool")?;

    let result = repo.migrate().await;
    repo.close().await;
    result.context("Failed to run migrations")?;

    println!("associations table ready");
    Ok(())
}

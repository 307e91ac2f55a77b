//! HTTP server command
//!
//! Opens storage, runs the server until shutdown, then closes storage.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use dealassoc_server::{
    run_server, AppState, MemoryAssociationRepository, PgAssociationRepository, ServerConfig,
    DEFAULT_MAX_CONNECTIONS,
};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "DEALASSOC_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long, env = "DEALASSOC_CORS_PERMISSIVE")]
    pub cors_permissive: bool,

    /// Database URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DEALASSOC_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Request timeout in seconds
    #[arg(long, env = "DEALASSOC_REQUEST_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// Skip schema creation on startup
    #[arg(long)]
    pub skip_migrations: bool,

    /// Keep records in process memory instead of Postgres (lost on exit).
    /// Takes precedence over any database URL.
    #[arg(long)]
    pub in_memory: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            request_timeout: Duration::from_secs(self.timeout),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    tracing::info!("Starting dealassoc server on {}", config.bind_addr);

    if args.in_memory {
        if args.database_url.is_some() {
            tracing::debug!("--in-memory set; ignoring configured database URL");
        }
        tracing::warn!("Using in-memory storage; records are lost on shutdown");
        let state = AppState::new(MemoryAssociationRepository::new());
        return run_server(state, config).await.context("Server error");
    }

    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let repo = PgAssociationRepository::connect(&database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    if !args.skip_migrations {
        if let Err(e) = repo.migrate().await {
            repo.close().await;
            return Err(e).context("Failed to run migrations");
        }
    }

    // Run server (blocks until shutdown), then release connections
    let result = run_server(AppState::new(repo.clone()), config).await;
    repo.close().await;

    result.context("Server error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ServeArgs,
    }

    #[test]
    fn defaults_match_server_config() {
        let Harness { args } = Harness::try_parse_from(["serve", "--in-memory"]).unwrap();
        let config = args.server_config();
        let default = ServerConfig::default();

        assert_eq!(config.bind_addr, default.bind_addr);
        assert_eq!(config.request_timeout, default.request_timeout);
        assert_eq!(args.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn in_memory_accepts_database_url() {
        let Harness { args } = Harness::try_parse_from([
            "serve",
            "--in-memory",
            "--database-url",
            "postgres://localhost/dealassoc",
        ])
        .unwrap();

        assert!(args.in_memory);
        assert_eq!(
            args.database_url.as_deref(),
            Some("postgres://localhost/dealassoc")
        );
    }
}

//! REST server for the countries service.
//!
//! Wires the country store, reminder repository, basic-auth gate, and
//! router together, with configuration layering and graceful shutdown.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use countries_api::middleware::{BasicAuth, StaticCredentials};
use countries_api::router::{AppState, Router};
use countries_api::server::Server;
use countries_core::config::ServiceConfig;
use countries_core::{CountryStore, MemoryReminderRepository};
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the countries server.
///
/// Precedence, lowest first: defaults, config file, `COUNTRIES_*`
/// environment variables, flags.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Host address to bind to
    #[arg(long)]
    host: Option<String>,

    /// Basic-auth realm
    #[arg(long)]
    realm: Option<String>,

    /// Accepted basic-auth username
    #[arg(long)]
    username: Option<String>,

    /// Accepted basic-auth password
    #[arg(long)]
    password: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    request_timeout_ms: Option<u64>,

    /// Largest accepted request body in bytes
    #[arg(long)]
    max_body_bytes: Option<usize>,
}

impl Args {
    /// Builds the effective configuration: defaults, file, environment, then flags.
    fn load_config(&self) -> anyhow::Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ServiceConfig::default(),
        };
        config
            .apply_env_overrides()
            .context("Invalid environment override")?;

        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(realm) = &self.realm {
            config.realm = realm.clone();
        }
        if let Some(username) = &self.username {
            config.username = username.clone();
        }
        if let Some(password) = &self.password {
            config.password = password.clone();
        }
        if let Some(timeout) = self.request_timeout_ms {
            config.request_timeout_ms = timeout;
        }
        if let Some(limit) = self.max_body_bytes {
            config.max_body_bytes = limit;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Arc::new(args.load_config()?);

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .init();

    let state = AppState::new(
        Arc::new(CountryStore::new()),
        Arc::new(MemoryReminderRepository::new()),
        config.clone(),
    );
    let auth = BasicAuth::new(
        config.realm.clone(),
        Arc::new(StaticCredentials::new(
            config.username.clone(),
            config.password.clone(),
        )),
    );
    let router = Router::new(state, auth);

    let addr = config.socket_addr()?;
    let server = Server::bind(addr, router)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Starting countries server");
    tracing::info!("  Address: {}", server.local_addr());
    tracing::info!("  Realm: {}", config.realm);
    tracing::info!("  Request timeout: {} ms", config.request_timeout_ms);
    tracing::info!("  Max body: {} bytes", config.max_body_bytes);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            tracing::error!("Server error: {}", e);
        }
    });

    signal::ctrl_c().await.context("Failed to listen for ctrl_c")?;
    tracing::info!("Shutting down server");
    server_handle.abort();

    Ok(())
}

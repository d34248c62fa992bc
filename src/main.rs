//! Session proxy binary.
//!
//! Mediates between anonymous clients and a single upstream requiring HTTP
//! Basic credentials plus a session cookie. Startup order: logging, config
//! (file → env overrides → validation), credential store, best-effort
//! session bootstrap, then the listener.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use session_proxy::config::{env, loader, ProxyConfig};
use session_proxy::lifecycle::{shutdown_signal, Shutdown};
use session_proxy::{observability, session, CredentialStore, HttpServer};

#[derive(Debug, Parser)]
#[command(name = "session-proxy", about = "Authenticating proxy for a session-cookie upstream")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen address (e.g., "127.0.0.1:8089").
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::logging::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => loader::load_config(path)?,
        None => ProxyConfig::default(),
    };
    env::apply_env_overrides(&mut config);
    if let Some(listen) = args.listen {
        config.listen_address = listen;
    }
    let config = loader::finalize(config)?;

    if config.password.is_empty() {
        tracing::warn!(
            "{} is not set; upstream auth will use an empty secret",
            env::UPSTREAM_PASSWORD
        );
    }

    tracing::info!(
        listen_address = %config.listen_address,
        upstream = %config.upstream_url,
        external = %config.external_url,
        "Configuration loaded"
    );

    let store = Arc::new(CredentialStore::new(&config.username, &config.password));

    // Best-effort: a failure here is surfaced in the log, and the response
    // interceptor backfills the cookie from normal traffic.
    {
        let config = config.clone();
        let store = store.clone();
        tokio::spawn(async move {
            if let Err(e) = session::bootstrap(&config, &store).await {
                tracing::error!(
                    error = %e,
                    "Session bootstrap failed; waiting for upstream traffic to issue a cookie"
                );
            }
        });
    }

    let listener = TcpListener::bind(&config.listen_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config, store)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

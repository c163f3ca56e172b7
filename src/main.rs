//! API relay
//!
//! One public endpoint in front of many third-party HTTP APIs. The first path
//! segment picks the provider, the rest of the path and the query string are
//! appended to that provider's base URL, and the response streams straight back.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                    RELAY                          │
//!   Client Request       │  ┌─────────┐    ┌──────────┐    ┌─────────────┐  │
//!   ─────────────────────┼─▶│  http   │───▶│ routing  │───▶│  security   │  │
//!   /openai/v1/models    │  │ server  │    │ (prefix) │    │ (deny list) │  │
//!                        │  └────┬────┘    └──────────┘    └──────┬──────┘  │
//!                        │       │ /, /robots.txt, 404            ▼         │
//!                        │       │                         ┌─────────────┐  │
//!   Client Response      │       │                         │  forwarder  │  │
//!   ◀────────────────────┼───────┴─────────────────────────│  upstream   │◀─┼── api.openai.com
//!                        │          streamed body          └─────────────┘  │
//!                        │                                                  │
//!                        │   config · observability · lifecycle             │
//!                        └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use api_relay::config::{load_config, validate_config, ConfigError, RelayConfig};
use api_relay::http::HttpServer;
use api_relay::lifecycle::{wait_for_signal, Shutdown};
use api_relay::observability::init_logging;

#[derive(Parser)]
#[command(name = "api-relay")]
#[command(about = "Prefix-routed forwarding relay for third-party HTTP APIs", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in provider table when omitted.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Interface to bind.
    #[arg(long, env = "RELAY_HOST")]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            let config = RelayConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            config
        }
    };
    if let Some(port) = cli.port {
        config.listener.port = port;
    }
    if let Some(host) = cli.host {
        config.listener.host = host;
    }

    init_logging(&config.observability);

    tracing::info!("api-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address(),
        routes = config.routes.0.len(),
        deny = ?config.headers.deny,
        connect_timeout_secs = config.upstream.connect_timeout_secs,
        request_timeout_secs = ?config.upstream.request_timeout_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Server is running on http://localhost:{}",
        listener.local_addr()?.port()
    );

    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! `todod`: the ToDo Reminder server binary.
//!
//! Usage:
//!   todod [--store <path|memory>] [--env <development|production>]
//!         [--host <addr>] [--port <port>]
//!
//! Every flag falls back to its environment variable (`TODO_STORE`,
//! `TODO_ENV`, `HOST`, `PORT`) and then to the built-in default.

mod bootstrap;
mod routes;

use clap::Parser;
use todo_core::{RunMode, ServiceConfig, StoreLocation};
use tracing::{info, warn};

/// ToDo Reminder server.
#[derive(Parser, Debug)]
#[command(name = "todod", about = "ToDo Reminder server")]
struct Cli {
    /// Store location: a redb file path, or `memory`.
    #[arg(long = "store")]
    store: Option<String>,

    /// Run mode: `development` or `production`.
    #[arg(long = "env")]
    env: Option<String>,

    /// Listen host.
    #[arg(long = "host")]
    host: Option<String>,

    /// Listen port.
    #[arg(long = "port")]
    port: Option<u16>,
}

impl Cli {
    fn apply(&self, config: &mut ServiceConfig) {
        if let Some(env) = &self.env {
            config.run_mode = RunMode::parse(env);
        }
        if let Some(store) = &self.store {
            config.store = StoreLocation::parse(store);
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ServiceConfig::from_env();
    cli.apply(&mut config);

    // Initialize logging; development turns on debug output.
    let default_filter = if config.run_mode.is_development() {
        "debug,tower_http=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    info!(
        "Starting todod in {} mode (store: {})",
        config.run_mode.as_str(),
        config.store
    );

    // Open the store once; it lives until the server shuts down.
    let db = bootstrap::connect_store(&config).await;

    let module = todo::TodoModule::new(db, config.run_mode)
        .map_err(|e| anyhow::anyhow!("failed to initialise todo module: {e}"))?;
    info!("{} module initialized", module.name());

    let app = routes::build_router(&module, config.run_mode.is_development());

    let listen = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("todod listening on {listen}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    drop(module);
    info!("todod stopped");
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}

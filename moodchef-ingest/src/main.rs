//! moodchef-ingest - recipe acquisition and mood classification
//!
//! `run` executes the pipeline once and prints the JSON summary.
//! `serve` exposes the same run behind `POST /run` for periodic triggering.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moodchef_common::config::{load_toml_config, resolve_config_path, resolve_database_url};
use moodchef_common::db::init_database;
use moodchef_ingest::services::execute_run;
use moodchef_ingest::AppState;

/// Command-line arguments for moodchef-ingest
#[derive(Parser, Debug)]
#[command(name = "moodchef-ingest")]
#[command(about = "Recipe acquisition and mood classification pipeline")]
#[command(version)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the pipeline once and print the summary
    Run,
    /// Serve the HTTP trigger
    Serve {
        /// Address to listen on (overrides [server] bind_addr)
        #[arg(short, long, env = "MOODCHEF_BIND_ADDR")]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref());
    let config = load_toml_config(config_path.as_deref()).context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting moodchef-ingest v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &config_path {
        info!("Config path: {}", path.display());
    }

    let database_url = resolve_database_url(&config)?;
    let db_pool = init_database(&database_url)
        .await
        .context("Failed to initialize database")?;
    info!("Database connection established");

    match args.command {
        Command::Run => {
            let summary = execute_run(&db_pool, &config).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Serve { bind } => {
            let bind_addr = bind.unwrap_or_else(|| config.server.bind_addr.clone());
            let app = moodchef_ingest::build_router(AppState::new(db_pool, config));

            let listener = tokio::net::TcpListener::bind(&bind_addr)
                .await
                .with_context(|| format!("Failed to bind to {}", bind_addr))?;
            info!("Listening on http://{}", bind_addr);
            info!("Trigger a run: POST http://{}/run", bind_addr);

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
                .context("Server error")?;

            info!("Server shutdown complete");
        }
    }

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

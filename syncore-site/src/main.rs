//! syncore-site - Marketing site backend entry point
//!
//! Serves the public home/contact pages and the admin content API over
//! a single SQLite database.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use syncore_common::{config, db};
use syncore_site::{build_router, mailer::Mailer, AppState};

/// Command-line arguments for syncore-site
#[derive(Parser, Debug)]
#[command(name = "syncore-site")]
#[command(about = "SynCore marketing site backend")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "SYNCORE_PORT")]
    port: u16,

    /// Data directory holding the database
    #[arg(short, long)]
    data_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "syncore_site=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting SynCore site backend v{}", env!("CARGO_PKG_VERSION"));

    let data_dir = config::resolve_data_dir(args.data_dir.as_deref(), "SYNCORE_DATA_DIR")
        .context("Failed to resolve data directory")?;
    let db_path = config::prepare_database_path(&data_dir)
        .context("Failed to prepare data directory")?;
    info!("Database path: {}", db_path.display());

    let pool = db::init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    // Empty token disables admin auth (development mode)
    let admin_token = db::get_setting(&pool, "admin_token")
        .await
        .context("Failed to load admin token")?
        .unwrap_or_default();
    if admin_token.is_empty() {
        info!("Admin API authentication disabled (admin_token is empty)");
    } else {
        info!("Admin API authentication enabled");
    }

    let mailer = Mailer::from_settings(&pool)
        .await
        .context("Failed to configure mailer")?;
    if mailer.is_enabled() {
        info!("Outbound mail enabled");
    } else {
        info!("Outbound mail disabled (smtp_host is empty)");
    }

    let state = AppState::new(pool, admin_token, mailer);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

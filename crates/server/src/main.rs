//! Desk REST API Server
//!
//! Serves the desk ticket tracker over HTTP for web UIs and external
//! integrations.

mod routes;

use anyhow::Result;
use axum::Router;
use clap::Parser;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use desk::commands::CommandExecutor;
use desk::storage::JsonFileStorage;

#[derive(Parser)]
#[command(name = "desk-server")]
#[command(about = "REST API server for the desk ticket tracker")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "DESK_LISTEN_ADDR", default_value = "0.0.0.0:3000")]
    addr: String,

    /// Path to the desk data directory
    #[arg(long, env = "DESK_DATA_DIR", default_value = ".desk")]
    data_dir: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();

    info!("Starting desk API server...");

    let storage = JsonFileStorage::new(&args.data_dir);
    storage.validate().map_err(|e| {
        anyhow::anyhow!(
            "Failed to initialize storage: {}\n\n\
             The server requires a desk repository to be initialized.\n\
             Run 'desk init' in the repository directory, or set DESK_DATA_DIR to point to an existing repository.",
            e
        )
    })?;

    info!("Using desk repository at: {}", args.data_dir);
    let executor = Arc::new(CommandExecutor::new(storage));

    // CORS for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", routes::create_routes(executor))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&args.addr).await?;
    info!("Server listening on http://{}", args.addr);

    axum::serve(listener, app).await?;

    Ok(())
}

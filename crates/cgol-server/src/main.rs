//! HTTP service that runs Game of Life simulations seeded from words.

mod api;
mod database;
mod telemetry;

use anyhow::Result;
use cgol_core::ServerConfig;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = ServerConfig::from_env();
    config.engine.validate()?;

    info!("Starting CGoL server on {}:{}", config.bind_address, config.port);

    let db = database::Database::new(&config.database_path).await?;
    db.migrate().await?;

    let app = api::router(api::AppState {
        db,
        engine: Arc::new(config.engine.clone()),
    });

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

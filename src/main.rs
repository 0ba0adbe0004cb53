//! student-api binary: load config, open the database, serve until signalled.

use clap::Parser;
use student_api::{app, config, open_pool, serve_with_shutdown, shutdown_signal, AppState, Args, SqliteStore};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = config::load(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("student_api=info,tower_http=info")),
        )
        .init();

    let pool = open_pool(&config.db_path).await?;
    let store = SqliteStore::try_new(pool).await?;
    tracing::info!(env = %config.env, db_path = %config.db_path, "storage initialized");

    let state = AppState::new(store);
    let listener = TcpListener::bind(&config.http_server.address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    serve_with_shutdown(listener, app(state), shutdown_signal(), config.shutdown_grace()).await;
    tracing::info!("server shutdown");
    Ok(())
}

//! Movie catalog server: loads settings, opens the SQLite database, ensures the
//! schema, and serves the resource, common, and docs routes until shutdown.
//!
//! Run from repo root: `cargo run -p movie-catalog-server`

use movie_catalog::{
    apply_migrations, build_router, connect, init_tracing, AppState, Settings, SqliteStore,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    init_tracing();

    let pool = connect(&settings.database_url).await?;
    apply_migrations(&pool).await?;

    let state = AppState::new(
        Arc::new(SqliteStore::new(pool.clone())),
        settings.reference_policy,
    );
    let app = build_router(state, &settings);

    let listener = TcpListener::bind((settings.host.as_str(), settings.port)).await?;
    tracing::info!(
        policy = ?settings.reference_policy,
        "listening on http://{}",
        listener.local_addr()?
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("database closed, bye");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

use axum::{Router, routing::get};
use configuration::Settings;
use database::{ReportRepository, ReportSource};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod pages;
pub mod render;

/// The shared application state that all handlers can access.
pub struct AppState<S> {
    pub source: S,
}

/// Builds the dashboard router over any report source.
pub fn build_router<S: ReportSource>(source: S) -> Router {
    let app_state = Arc::new(AppState { source });

    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/summary", get(handlers::summary::<S>))
        .route("/returns", get(handlers::returns::<S>))
        .route("/volatility", get(handlers::volatility::<S>))
        .route("/volume", get(handlers::volume::<S>))
        .route("/average", get(handlers::average::<S>))
        .route("/explore", get(handlers::explore::<S>))
        .fallback(handlers::not_found)
        .with_state(app_state)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// The store pool is created here, handed to the router and closed once the
/// server has drained after a shutdown signal.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;
    let db_pool = database::connect(&settings.database).await?;
    let repository = ReportRepository::new(db_pool);

    let app = build_router(repository.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    repository.close().await;
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C.");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM.");
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
    tracing::info!("Shutdown signal received.");
}

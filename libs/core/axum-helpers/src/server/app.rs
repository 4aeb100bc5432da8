use super::shutdown::shutdown_signal;
use crate::errors::handlers::not_found;
use crate::http::catch_panic_layer;
use axum::Router;
use core_config::server::ServerConfig;
use std::future::IntoFuture;
use std::io;
use tokio::sync::oneshot;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};

/// Starts the Axum server with graceful shutdown.
///
/// After SIGINT/SIGTERM the listener stops accepting connections and in-flight
/// requests get `server_config.shutdown_timeout` to finish before the server
/// returns anyway.
///
/// # Errors
/// Returns an error if:
/// - The TCP listener fails to bind to the configured address
/// - The server encounters an error during operation
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(());
        })
        .into_future();

    let drain_timeout = server_config.shutdown_timeout;
    let drain_deadline = async move {
        if signalled_rx.await.is_ok() {
            tokio::time::sleep(drain_timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => {
            result.inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e))?;
            info!("Server stopped");
        }
        _ = drain_deadline => {
            warn!(timeout = ?drain_timeout, "Graceful shutdown timed out, dropping in-flight requests");
        }
    }

    Ok(())
}

/// Wraps application routes with the cross-cutting layers every service uses:
/// - HTTP request tracing
/// - panic-to-500 conversion
/// - a JSON 404 fallback
pub fn create_router(routes: Router) -> Router {
    routes
        .fallback(not_found)
        .layer(catch_panic_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

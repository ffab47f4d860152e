// ABOUTME: HTTP server assembly: shared resources, router composition, middleware, and serve loop
// ABOUTME: Drains in-flight requests on Ctrl-C within the configured shutdown window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

//! # Server
//!
//! [`ServerResources`] is built once in `main` and shared by every handler
//! through an `Arc`. Nothing in it is replaced after startup.
//!
//! Middleware, outermost first: request id assignment, request tracing,
//! request id propagation onto the response, per-request timeout. A request
//! that runs out of time answers 408 with the structured error body.

use crate::config::ServerConfig;
use crate::constants::routes;
use crate::errors::{AppError, AppResult};
use crate::routes::{HealthRoutes, RecipeRoutes, UiRoutes};
use crate::services::RecipeService;
use axum::error_handling::HandleErrorLayer;
use axum::http::HeaderName;
use axum::{BoxError, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::timeout::error::Elapsed;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Process-wide state shared by all request handlers
pub struct ServerResources {
    /// Recipe operations
    pub recipes: RecipeService,
    /// Configuration the server was started with
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle the service with its configuration
    #[must_use]
    pub fn new(recipes: RecipeService, config: ServerConfig) -> Self {
        Self {
            recipes,
            config: Arc::new(config),
        }
    }
}

/// Compose the API, health, and UI routers with the middleware stack
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let config = &resources.config;

    Router::new()
        .nest(routes::API_PREFIX, RecipeRoutes::routes(Arc::clone(resources)))
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .merge(UiRoutes::routes(&config.assets_dir, &config.index_file()))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(config.timeouts.request),
        )
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::request_timeout("Request did not complete within the request timeout")
    } else {
        AppError::internal(format!("Unhandled middleware error: {err}"))
    }
}

/// Bind the configured address and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn serve(resources: Arc<ServerResources>) -> AppResult<()> {
    let addr = resources.config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    info!(%addr, "HTTP server listening");

    serve_with_shutdown(listener, resources, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
///
/// After the signal, open connections get the configured drain window to
/// finish before the server is abandoned.
///
/// # Errors
///
/// Returns an error if the server fails before or during the drain
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    resources: Arc<ServerResources>,
    shutdown: F,
) -> AppResult<()>
where
    F: std::future::Future<Output = ()> + Send,
{
    let drain_window = resources.config.timeouts.shutdown;
    let app = build_router(&resources);
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                // A dropped sender also stops the server
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        finished = &mut server => return flatten_server_result(finished),
        () = shutdown => {
            info!(drain_secs = drain_window.as_secs(), "Shutdown signal received, draining connections");
        }
    }

    let _ = stop_tx.send(());
    match tokio::time::timeout(drain_window, &mut server).await {
        Ok(finished) => {
            flatten_server_result(finished)?;
            info!("HTTP server stopped");
            Ok(())
        }
        Err(_) => {
            warn!("Drain window elapsed with requests still in flight, aborting");
            server.abort();
            Ok(())
        }
    }
}

fn flatten_server_result(
    finished: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> AppResult<()> {
    match finished {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AppError::internal(format!("HTTP server error: {e}"))),
        Err(e) => Err(AppError::internal(format!("HTTP server task failed: {e}"))),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, shutting down");
    }
}

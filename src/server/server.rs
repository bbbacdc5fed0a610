//! Probe HTTP server with axum router and graceful shutdown.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{get_health, get_probe_latency, get_probe_route, AppState};
use super::ServerError;
use crate::config::AppConfig;

/// HTTP server exposing the probe endpoints.
pub struct ProbeServer {
    /// Application state shared across handlers.
    state: AppState,
    /// Cancellation token for graceful shutdown.
    cancel: CancellationToken,
}

impl ProbeServer {
    /// Create a new server for the given configuration.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(Arc::new(config)),
            cancel: CancellationToken::new(),
        }
    }

    /// Use an externally owned shutdown token (builder pattern).
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Get the configured address as a string.
    #[must_use]
    pub fn address(&self) -> String {
        self.state.config.server.address()
    }

    /// Build the axum router with all routes and middleware.
    pub fn build_router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Run the server, binding to the configured address.
    ///
    /// The server will run until the cancellation token is triggered,
    /// at which point it will perform a graceful shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or serve.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.address();
        let app = self.build_router();
        let cancel = self.cancel;

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::BindError {
                address: addr.clone(),
                source,
            })?;

        tracing::info!(address = %addr, "Probe server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
                tracing::info!("Probe server shutting down gracefully");
            })
            .await?;
        Ok(())
    }
}

/// Build the router for the given state.
///
/// The request deadline is enforced by the probe handlers so that a timed
/// out request still gets a JSON error body.
pub fn create_router(state: AppState) -> Router {
    let cors_permissive = state.config.server.cors_permissive;

    let router = Router::new()
        .route("/health", get(get_health))
        .route("/probe-latency", get(get_probe_latency))
        .route("/probe-route", get(get_probe_route))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

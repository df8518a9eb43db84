//! Search HTTP server with axum router and graceful shutdown.

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{index, not_found, search, AppState};
use super::ServerError;
use crate::config::ServerSettings;

/// Search HTTP server.
pub struct SearchServer {
    /// Bind address and static file location.
    settings: ServerSettings,
    /// Application state shared across handlers.
    state: AppState,
    /// Cancellation token for graceful shutdown.
    cancel: CancellationToken,
}

impl SearchServer {
    #[must_use]
    pub fn new(settings: ServerSettings, state: AppState) -> Self {
        Self {
            settings,
            state,
            cancel: CancellationToken::new(),
        }
    }

    /// Use an externally owned shutdown token (builder pattern).
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that stops the server when cancelled.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Get the configured address as a string.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.settings.host, self.settings.port)
    }

    /// Build the axum router with all routes and middleware.
    pub fn build_router(&self) -> Router {
        let images = ServeDir::new(self.settings.public_dir.join("images"));

        Router::new()
            .route("/", get(index))
            .route("/search", get(search))
            .nest_service("/images", images)
            .fallback(not_found)
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Bind to the configured address and serve until cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or serve.
    pub async fn run(self) -> Result<(), ServerError> {
        let address = self.address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::BindError { address, source })?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if serving fails.
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let cancel = self.cancel.clone();
        let app = self.build_router();

        tracing::info!(address = %listener.local_addr()?, "Listening");
        tracing::info!(
            files = ?self.state.runner.catalog().files(),
            "Valid log files"
        );

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
            tracing::info!("Search server shutting down gracefully");
        })
        .await?;

        Ok(())
    }
}

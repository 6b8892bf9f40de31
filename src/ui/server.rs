//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::ConnectionRegistry;
use crate::usecase::{JoinChatUseCase, LeaveChatUseCase, PostMessageUseCase};

use super::{
    handler::{health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Fan chat server
///
/// Wires the usecases into an axum router and owns the connection drain on
/// shutdown.
pub struct Server {
    join_chat: Arc<JoinChatUseCase>,
    leave_chat: Arc<LeaveChatUseCase>,
    post_message: Arc<PostMessageUseCase>,
    registry: Arc<dyn ConnectionRegistry>,
}

impl Server {
    pub fn new(
        join_chat: Arc<JoinChatUseCase>,
        leave_chat: Arc<LeaveChatUseCase>,
        post_message: Arc<PostMessageUseCase>,
        registry: Arc<dyn ConnectionRegistry>,
    ) -> Self {
        Self {
            join_chat,
            leave_chat,
            post_message,
            registry,
        }
    }

    /// Build the router over the given state
    ///
    /// Exposed separately so integration tests can serve the app on an
    /// ephemeral port.
    pub fn app(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/ws", get(websocket_handler))
            .route("/api/health", get(health_check))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the fan chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let state = Arc::new(AppState {
            join_chat: self.join_chat,
            leave_chat: self.leave_chat,
            post_message: self.post_message,
        });
        let app = Self::app(state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Fan chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        // Drain: drop every live connection before exiting
        self.registry.close_all().await;
        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

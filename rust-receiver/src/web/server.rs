//! Server construction and lifecycle.

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use axum::{extract::DefaultBodyLimit, middleware::from_fn, routing::any, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::ServerError;
use crate::web::cors::cors;
use crate::web::handlers::{not_found, webhook};

/// Build the application router.
///
/// CORS wraps every route and the fallback, so preflight requests are
/// answered before routing. Tracing sits outside CORS to see every request.
/// Request bodies are not size capped.
pub fn router() -> Router {
    Router::new()
        .route("/webhook", any(webhook))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(from_fn(cors))
        .layer(TraceLayer::new_for_http())
}

/// A bound listener together with the router it serves.
pub struct WebhookServer {
    listener: TcpListener,
    router: Router,
}

impl WebhookServer {
    /// Bind to `addr`. Port 0 picks an ephemeral port; see [`local_addr`](Self::local_addr).
    pub async fn bind(addr: SocketAddr) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        Ok(Self {
            listener,
            router: router(),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until `shutdown` completes, then drain in-flight requests.
    pub async fn run<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = self.local_addr() {
            info!(address = %addr, "web_server_listening");
        }

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)
    }
}

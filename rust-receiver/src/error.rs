//! Error types for request handling and server lifecycle.

use std::io;
use std::net::SocketAddr;

use axum::{
    extract::rejection::BytesRejection,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure to turn a request body into a [`WebhookPayload`](crate::WebhookPayload).
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    #[error("unexpected end of input")]
    Empty,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Client-facing webhook errors.
///
/// The `Display` text is exactly the response body minus its trailing newline;
/// decode details stay in the process log.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Invalid request method")]
    MethodNotAllowed(Method),

    #[error("Bad request")]
    BadRequest(#[from] DecodeError),
}

impl WebhookError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebhookError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            WebhookError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (self.status(), format!("{self}\n")).into_response()
    }
}

/// Server startup and accept-loop failures.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

//! Webhook endpoint handlers.
//!
//! The webhook handler only:
//! 1. Checks the method
//! 2. Decodes the JSON body
//! 3. Logs the message and acknowledges
//!
//! Preflight requests never get here; the CORS middleware answers them.

use axum::{
    body::Bytes,
    extract::rejection::BytesRejection,
    http::{Method, StatusCode},
};
use tracing::{info, warn};

use crate::error::{DecodeError, WebhookError};
use crate::payload::WebhookPayload;

/// Body returned for an accepted webhook.
pub const WEBHOOK_ACK: &str = "Webhook received!\n";

/// Body returned for paths with no route.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Webhook endpoint.
///
/// Routed for every method; anything other than POST is answered with 405
/// here rather than by the router so the response body stays consistent.
pub async fn webhook(
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<&'static str, WebhookError> {
    if method != Method::POST {
        warn!(method = %method, "webhook_method_not_allowed");
        return Err(WebhookError::MethodNotAllowed(method));
    }

    let payload = body
        .map_err(DecodeError::from)
        .and_then(|bytes| WebhookPayload::from_slice(&bytes))
        .map_err(|err| {
            warn!("Error decoding JSON: {err}");
            err
        })?;

    info!("Received data: {}", payload.message);

    Ok(WEBHOOK_ACK)
}

/// Fallback for unrouted paths.
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

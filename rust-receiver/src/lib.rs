//! Webhook Receiver - minimal HTTP webhook endpoint.
//!
//! Accepts JSON payloads on `POST /webhook`, logs the `message` field and
//! acknowledges with a fixed text body. Every response carries permissive CORS
//! headers and preflight requests are answered without touching the router.
//!
//! ## Request flow
//!
//! ```text
//! Request → TraceLayer → CORS (OPTIONS stops here) → /webhook → handler
//! ```

pub mod config;
pub mod error;
pub mod payload;
pub mod web;

// Re-export commonly used types
pub use config::{Config, InvalidVar, LogFormat, LISTEN_PORT};
pub use error::{DecodeError, ServerError, WebhookError};
pub use payload::WebhookPayload;
pub use web::{router, WebhookServer};

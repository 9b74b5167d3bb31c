//! Web server module for receiving webhooks.
//!
//! This module provides:
//! - A permissive CORS middleware wrapping every route
//! - The `/webhook` handler that decodes, logs and acknowledges
//! - A server type owning its listener and router

pub mod cors;
pub mod handlers;
pub mod server;

pub use cors::{apply_cors_headers, cors};
pub use handlers::{not_found, webhook, NOT_FOUND_BODY, WEBHOOK_ACK};
pub use server::{router, WebhookServer};

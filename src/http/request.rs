//! Request metadata helpers.
//!
//! # Responsibilities
//! - Request ID constants and lookup (generation is handled by the
//!   tower-http request-id layers wired in server.rs)
//! - Carry the interceptor's output to the dispatch stage

use axum::http::HeaderMap;

use crate::http::body::BufferedBody;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Read the request ID set by the request-id layer, if any.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Request-scoped result of envelope interception, attached as an extension
/// for the dispatch stage.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// Routing key extracted from `action.name`.
    pub action_name: String,
    /// The untouched wire bytes, kept for diagnostics and audit logging.
    pub raw_body: BufferedBody,
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the actions gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Envelope interception settings.
    pub actions: ActionsConfig,

    /// Action handler definitions (action name → upstream).
    pub handlers: Vec<HandlerConfig>,

    /// Default upstream for traffic that is not an action call.
    pub upstream: Option<UpstreamConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Envelope interception settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Whether the interceptor runs at all. Disabled by default; unrelated
    /// deployments see zero overhead.
    pub enabled: bool,

    /// Request path the dispatch engine is configured to call.
    pub path: String,

    /// Maximum envelope size buffered for rewriting (bytes).
    pub max_body_size: usize,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "/actions".to_string(),
            max_body_size: 1024 * 1024,
        }
    }
}

/// One action handler registration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HandlerConfig {
    /// Action name this handler serves (matches `action.name`).
    pub action: String,

    /// Upstream address (host:port).
    pub address: String,

    /// Path on the upstream. Defaults to `<actions.path>/<action>`.
    #[serde(default)]
    pub path: Option<String>,
}

/// Default upstream for non-action traffic.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Upstream address (host:port).
    pub address: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// End-to-end request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Whether to expose Prometheus metrics.
    pub metrics_enabled: bool,

    /// Address for the metrics exporter.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

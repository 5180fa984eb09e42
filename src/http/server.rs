//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with the envelope interceptor wired in
//! - Configure middleware (tracing, timeout, request ID)
//! - Bind server to listener, graceful shutdown
//! - Dispatch rewritten action calls to their registered handler
//! - Forward non-action traffic to the default upstream

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{debug, error, warn};

use crate::config::GatewayConfig;
use crate::http::middleware::actions::action_interceptor;
use crate::http::request::{request_id, ActionContext, X_REQUEST_ID};
use crate::http::response::{reject, ActionError};
use crate::observability::metrics;
use crate::routing::ActionRegistry;

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<GatewayConfig>,
    pub registry: Arc<ActionRegistry>,
    pub client: Client<HttpConnector, Body>,
}

/// HTTP server for the actions gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let registry = Arc::new(ActionRegistry::from_config(
            &config.actions.path,
            &config.handlers,
        ));
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = GatewayState {
            config: Arc::new(config.clone()),
            registry,
            client,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: GatewayState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state.clone())
            .layer(middleware::from_fn_with_state(state, action_interceptor))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The assembled router, for in-process testing.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            actions_enabled = self.config.actions.enabled,
            actions_path = %self.config.actions.path,
            handlers = self.config.handlers.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.recv() => {}
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Catch-all handler behind the interceptor.
///
/// Intercepted requests carry an [`ActionContext`]; their rewritten body is
/// forwarded to the handler registered for the action name. Everything else
/// goes to the default upstream, untouched.
async fn dispatch_handler(
    State(state): State<GatewayState>,
    request: Request<Body>,
) -> Response {
    let start = Instant::now();
    let req_id = request_id(request.headers()).to_string();

    if let Some(ctx) = request.extensions().get::<ActionContext>().cloned() {
        let uri = match state.registry.lookup(&ctx.action_name) {
            Some(route) => format!("http://{}{}", route.address, route.path),
            None => {
                warn!(
                    request_id = %req_id,
                    action = %ctx.action_name,
                    "No handler registered for action"
                );
                metrics::record_request(&ctx.action_name, 404, start);
                return reject(
                    StatusCode::NOT_FOUND,
                    ActionError::new(format!(
                        "No handler registered for action `{}`",
                        ctx.action_name
                    )),
                );
            }
        };

        debug!(
            request_id = %req_id,
            action = %ctx.action_name,
            uri = %uri,
            original_len = ctx.raw_body.len(),
            "Dispatching action"
        );
        forward(&state, request, uri, &ctx.action_name, &req_id, start).await
    } else if let Some(upstream) = &state.config.upstream {
        let path_and_query = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());
        let uri = format!("http://{}{}", upstream.address, path_and_query);
        forward(&state, request, uri, "passthrough", &req_id, start).await
    } else {
        metrics::record_request("passthrough", 404, start);
        reject(
            StatusCode::NOT_FOUND,
            ActionError::new("No upstream configured for this path"),
        )
    }
}

/// Forward a request to an upstream and relay its response.
async fn forward(
    state: &GatewayState,
    request: Request<Body>,
    uri: String,
    action: &str,
    req_id: &str,
    start: Instant,
) -> Response {
    let (parts, body) = request.into_parts();

    let mut builder = Request::builder().method(parts.method.clone()).uri(&uri);
    if let Some(headers) = builder.headers_mut() {
        for (name, value) in parts.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
        if let Ok(value) = req_id.parse() {
            headers.insert(X_REQUEST_ID, value);
        }
    }

    let upstream_request = match builder.body(body) {
        Ok(r) => r,
        Err(e) => {
            error!(request_id = %req_id, error = %e, "Failed to build upstream request");
            metrics::record_request(action, 500, start);
            return reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                ActionError::new("Failed to build upstream request"),
            );
        }
    };

    match state.client.request(upstream_request).await {
        Ok(response) => {
            let status = response.status();
            metrics::record_request(action, status.as_u16(), start);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body)).into_response()
        }
        Err(e) => {
            error!(request_id = %req_id, uri = %uri, error = %e, "Upstream error");
            metrics::record_request(action, 502, start);
            reject(
                StatusCode::BAD_GATEWAY,
                ActionError::new(format!("Action handler unreachable: {}", e)),
            )
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

//! Envelope interception middleware.
//!
//! Gates on the configured action path, buffers the envelope, rewrites it,
//! and substitutes the body seen by everything downstream. Unrelated traffic
//! passes through untouched, without the body ever being read.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::CONTENT_LENGTH, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, warn};

use crate::envelope::rewriter;
use crate::http::body::BufferedBody;
use crate::http::request::{request_id, ActionContext};
use crate::http::response::{reject, ActionError};
use crate::http::server::GatewayState;
use crate::observability::metrics;

/// Per-request interception. Either the request continues downstream with a
/// rewritten body and an [`ActionContext`] extension, or it is rejected here;
/// there is no partially rewritten state.
pub async fn action_interceptor(
    State(state): State<GatewayState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let actions = &state.config.actions;
    if !actions.enabled || request.uri().path() != actions.path {
        return next.run(request).await;
    }

    let (mut parts, body) = request.into_parts();
    let req_id = request_id(&parts.headers).to_string();

    let raw = match BufferedBody::buffer(body, actions.max_body_size).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(request_id = %req_id, error = %e, "Failed to buffer action envelope");
            return reject(
                StatusCode::BAD_REQUEST,
                ActionError::new(e.to_string()).with_code("malformed-envelope"),
            );
        }
    };

    let start = Instant::now();
    match rewriter::rewrite(raw.as_bytes()) {
        Ok(rewritten) => {
            metrics::record_rewrite("ok", start);
            debug!(
                request_id = %req_id,
                action = %rewritten.action_name,
                body_len = rewritten.body.len(),
                "Envelope rewritten"
            );

            // The body changed size; the stale length must not be forwarded.
            parts
                .headers
                .insert(CONTENT_LENGTH, HeaderValue::from(rewritten.body.len()));
            parts.extensions.insert(ActionContext {
                action_name: rewritten.action_name,
                raw_body: raw,
            });
            let request =
                Request::from_parts(parts, BufferedBody::new(rewritten.body).to_body());
            next.run(request).await
        }
        Err(e) => {
            metrics::record_rewrite("rejected", start);
            warn!(
                request_id = %req_id,
                action = e.action_name().unwrap_or("unknown"),
                error = %e,
                "Rejecting action envelope"
            );
            reject(StatusCode::BAD_REQUEST, ActionError::from(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use crate::http::server::GatewayServer;
    use axum::http::Request as HttpRequest;
    use serde_json::{json, Value as JsonValue};
    use tower::ServiceExt;

    fn enabled_config() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.actions.enabled = true;
        config
    }

    async fn send(
        config: GatewayConfig,
        path: &str,
        body: &str,
    ) -> (StatusCode, bytes::Bytes) {
        let router = GatewayServer::new(config).into_router();
        let response = router
            .oneshot(
                HttpRequest::post(path)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        (status, bytes)
    }

    #[tokio::test]
    async fn disabled_feature_never_touches_the_body() {
        let (status, body) = send(
            GatewayConfig::default(),
            "/actions",
            "this is not even json",
        )
        .await;
        // No upstream configured: the catch-all answers 404, but the
        // interceptor must not have parsed (and rejected) the body.
        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: JsonValue = serde_json::from_slice(&body).unwrap();
        assert!(error["message"].as_str().unwrap().contains("No upstream"));
    }

    #[tokio::test]
    async fn non_target_path_is_ignored() {
        let (status, _) = send(enabled_config(), "/other", "not json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_envelope_is_rejected() {
        let (status, body) = send(enabled_config(), "/actions", "{oops").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: JsonValue = serde_json::from_slice(&body).unwrap();
        assert_eq!(error["extensions"]["code"], "malformed-envelope");
    }

    #[tokio::test]
    async fn too_many_arguments_is_rejected_with_action_name() {
        let envelope = json!({
            "input": { "a": { "x": 1 }, "b": { "y": 2 } },
            "action": { "name": "foo" }
        });
        let (status, body) =
            send(enabled_config(), "/actions", &envelope.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: JsonValue = serde_json::from_slice(&body).unwrap();
        let message = error["message"].as_str().unwrap();
        assert!(message.contains("foo"));
        assert!(message.contains("more than 1 arguments"));
    }

    #[tokio::test]
    async fn valid_envelope_without_handler_is_a_dispatch_404() {
        let envelope = json!({
            "input": { "args": { "content": "x" } },
            "action": { "name": "upload" }
        });
        let (status, body) =
            send(enabled_config(), "/actions", &envelope.to_string()).await;

        // The rewrite succeeded; the registry had nothing for `upload`.
        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: JsonValue = serde_json::from_slice(&body).unwrap();
        assert!(error["message"].as_str().unwrap().contains("upload"));
    }

    #[tokio::test]
    async fn oversized_envelope_is_rejected() {
        let mut config = enabled_config();
        config.actions.max_body_size = 32;
        let envelope = json!({
            "input": { "args": { "content": "x".repeat(128) } },
            "action": { "name": "upload" }
        });
        let (status, _) = send(config, "/actions", &envelope.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

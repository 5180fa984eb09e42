//! Error responses in the dispatch engine's expected shape.
//!
//! Rejected action calls are answered with a JSON body the engine relays to
//! the GraphQL client: a `message` plus optional `extensions` (machine
//! readable code and extra data).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::envelope::rewriter::RewriteError;

/// JSON error body for rejected action calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionError {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<JsonMap<String, JsonValue>>,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: None,
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.extensions
            .get_or_insert_with(JsonMap::new)
            .insert("code".to_string(), JsonValue::String(code.to_string()));
        self
    }
}

impl From<&RewriteError> for ActionError {
    fn from(err: &RewriteError) -> Self {
        let code = match err {
            RewriteError::MalformedEnvelope(_) => "malformed-envelope",
            RewriteError::TooManyArguments { .. } => "too-many-arguments",
            RewriteError::NonObjectArgument { .. } => "non-object-argument",
        };
        ActionError::new(err.to_string()).with_code(code)
    }
}

/// Build a JSON rejection response.
pub fn reject(status: StatusCode, error: ActionError) -> Response {
    (status, Json(error)).into_response()
}

//! Envelope rewriting.
//!
//! # Responsibilities
//! - Parse the raw webhook envelope exactly once
//! - Enforce the single-argument constraint (`input` has 0 or 1 entries)
//! - Inject an independent copy of the envelope under `actionPayload`
//! - Produce the rewritten body plus the extracted action name
//!
//! # Design Decisions
//! - Pure function over request-local data; safe to call from any task
//! - The `actionPayload` copy is re-parsed from the raw bytes, never cloned
//!   from the live tree, so the argument object and the embedded copy share
//!   no structure
//! - Missing or empty `action.name` is rejected as a malformed envelope
//!   rather than guessing a default

use bytes::Bytes;
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Reserved key injected into the argument object. Must not collide with a
/// legitimate argument-slot name; action schemas are responsible for
/// reserving it.
pub const ACTION_PAYLOAD_KEY: &str = "actionPayload";

/// Successful rewrite: the new request body and the routing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    /// Serialized argument object with `actionPayload` injected.
    pub body: Bytes,
    /// Value of `action.name`, used by the dispatch layer to pick a handler.
    pub action_name: String,
}

/// Structured rewrite failure. All variants are terminal for the request.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// Body is not valid JSON, not a JSON object, or lacks a usable
    /// `action.name`.
    #[error("Invalid action envelope: {0}")]
    MalformedEnvelope(String),

    /// `input` carries more than one argument slot.
    #[error("Action `{action}` has more than 1 arguments. You need to define actions with a single argument of an object type.")]
    TooManyArguments { action: String },

    /// The single argument value is a scalar or array.
    #[error("Action `{action}` must have a single argument of an object type.")]
    NonObjectArgument { action: String },
}

impl RewriteError {
    /// The offending action name, when the envelope carried one.
    pub fn action_name(&self) -> Option<&str> {
        match self {
            RewriteError::MalformedEnvelope(_) => None,
            RewriteError::TooManyArguments { action } => Some(action),
            RewriteError::NonObjectArgument { action } => Some(action),
        }
    }
}

/// Rewrite a raw action envelope into the argument body expected by handlers.
///
/// Given `{"input":{"args":{"content":"x"}},"action":{"name":"upload"}}` this
/// produces the body
/// `{"content":"x","actionPayload":{"input":{"args":{"content":"x"}},"action":{"name":"upload"}}}`
/// and the action name `upload`.
pub fn rewrite(raw: &[u8]) -> Result<Rewritten, RewriteError> {
    let envelope: JsonValue = serde_json::from_slice(raw)
        .map_err(|e| RewriteError::MalformedEnvelope(e.to_string()))?;
    let envelope = envelope.as_object().ok_or_else(|| {
        RewriteError::MalformedEnvelope("body must be a JSON object".to_string())
    })?;

    let action = action_name(envelope)?;

    let mut argument = match envelope.get("input") {
        // Absent input is treated as an empty argument list; anything
        // present must actually be a mapping, null included.
        None => JsonMap::new(),
        Some(JsonValue::Object(input)) => match input.len() {
            0 => JsonMap::new(),
            1 => match input.values().next() {
                Some(JsonValue::Object(arg)) => arg.clone(),
                _ => return Err(RewriteError::NonObjectArgument { action }),
            },
            _ => return Err(RewriteError::TooManyArguments { action }),
        },
        Some(_) => {
            return Err(RewriteError::MalformedEnvelope(
                "`input` must be a JSON object".to_string(),
            ))
        }
    };

    // Second parse of the same bytes: the embedded copy must stay intact even
    // if downstream code mutates the argument object, and vice versa.
    let payload_copy: JsonValue = serde_json::from_slice(raw)
        .map_err(|e| RewriteError::MalformedEnvelope(e.to_string()))?;
    argument.insert(ACTION_PAYLOAD_KEY.to_string(), payload_copy);

    let body = serde_json::to_vec(&JsonValue::Object(argument))
        .map_err(|e| RewriteError::MalformedEnvelope(e.to_string()))?;

    Ok(Rewritten {
        body: Bytes::from(body),
        action_name: action,
    })
}

/// Extract `action.name`, rejecting envelopes where it is absent or empty.
fn action_name(envelope: &JsonMap<String, JsonValue>) -> Result<String, RewriteError> {
    match envelope
        .get("action")
        .and_then(|a| a.get("name"))
        .and_then(JsonValue::as_str)
    {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(RewriteError::MalformedEnvelope(
            "`action.name` must be a non-empty string".to_string(),
        )),
    }
}

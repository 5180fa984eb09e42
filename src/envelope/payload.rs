//! Typed view of the action envelope.
//!
//! The rewriter itself works on raw JSON trees; these types exist for
//! handlers and diagnostics that want to deserialize the `actionPayload`
//! copy embedded in their argument object.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::HashMap;

/// The full webhook envelope as delivered by the dispatch engine.
///
/// ```json
/// {
///   "request_query": "mutation { upload(args:{content:\"x\"}) { result } }",
///   "session_variables": { "x-hasura-role": "admin" },
///   "input": { "args": { "content": "x" } },
///   "action": { "name": "upload" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEnvelope {
    /// The GraphQL query that triggered the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_query: Option<String>,

    /// Session context (`x-hasura-role`, `x-hasura-user-id`, ...). Passed
    /// through verbatim, never interpreted here.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub session_variables: HashMap<String, String>,

    /// The argument slots. Schemas declare at most one, of object type.
    #[serde(default)]
    pub input: JsonMap<String, JsonValue>,

    pub action: ActionRef,
}

/// The invoked action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRef {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::rewriter::{rewrite, ACTION_PAYLOAD_KEY};
    use serde_json::json;

    #[test]
    fn embedded_payload_deserializes_into_typed_envelope() {
        let raw = serde_json::to_vec(&json!({
            "request_query": "mutation { upload(args:{content:\"x\"}) { result } }",
            "session_variables": { "x-hasura-role": "admin" },
            "input": { "args": { "content": "x" } },
            "action": { "name": "upload" }
        }))
        .unwrap();

        let rewritten = rewrite(&raw).unwrap();
        let body: JsonValue = serde_json::from_slice(&rewritten.body).unwrap();
        let envelope: ActionEnvelope =
            serde_json::from_value(body[ACTION_PAYLOAD_KEY].clone()).unwrap();

        assert_eq!(envelope.action.name, "upload");
        assert_eq!(
            envelope.session_variables.get("x-hasura-role").map(String::as_str),
            Some("admin")
        );
        assert!(envelope.input.contains_key("args"));
        assert!(envelope.request_query.is_some());
    }

    #[test]
    fn minimal_envelope_needs_only_action() {
        let envelope: ActionEnvelope =
            serde_json::from_value(json!({ "action": { "name": "ping" } })).unwrap();
        assert_eq!(envelope.action.name, "ping");
        assert!(envelope.input.is_empty());
        assert!(envelope.session_variables.is_empty());
    }
}

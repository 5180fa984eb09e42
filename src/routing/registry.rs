//! Action handler registry.
//!
//! # Responsibilities
//! - Store compiled handler routes
//! - Look up the handler for an extracted action name
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) lookup via HashMap keyed by action name
//! - Explicit None rather than silent default

use std::collections::HashMap;

use crate::config::schema::HandlerConfig;

/// A compiled route to an action handler.
#[derive(Debug, Clone)]
pub struct HandlerRoute {
    /// Action name this route serves.
    pub action: String,
    /// Upstream address (host:port).
    pub address: String,
    /// Path on the upstream the request is forwarded to.
    pub path: String,
}

/// Immutable map from action name to handler route, built at startup.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    routes: HashMap<String, HandlerRoute>,
}

impl ActionRegistry {
    /// Compile the registry from handler configuration. A handler without an
    /// explicit path is reachable at `<base_path>/<action>`, mirroring how
    /// handlers are conventionally mounted.
    pub fn from_config(base_path: &str, handlers: &[HandlerConfig]) -> Self {
        let routes = handlers
            .iter()
            .map(|h| {
                let path = h
                    .path
                    .clone()
                    .unwrap_or_else(|| format!("{}/{}", base_path, h.action));
                (
                    h.action.clone(),
                    HandlerRoute {
                        action: h.action.clone(),
                        address: h.address.clone(),
                        path,
                    },
                )
            })
            .collect();
        Self { routes }
    }

    /// Look up the handler registered for an action name.
    pub fn lookup(&self, action: &str) -> Option<&HandlerRoute> {
        self.routes.get(action)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(action: &str, address: &str, path: Option<&str>) -> HandlerConfig {
        HandlerConfig {
            action: action.to_string(),
            address: address.to_string(),
            path: path.map(str::to_string),
        }
    }

    #[test]
    fn lookup_finds_registered_action() {
        let registry = ActionRegistry::from_config(
            "/actions",
            &[handler("upload", "127.0.0.1:9000", None)],
        );

        let route = registry.lookup("upload").unwrap();
        assert_eq!(route.address, "127.0.0.1:9000");
        assert_eq!(route.path, "/actions/upload");
        assert!(registry.lookup("unknown").is_none());
    }

    #[test]
    fn explicit_path_overrides_convention() {
        let registry = ActionRegistry::from_config(
            "/actions",
            &[handler("upload", "127.0.0.1:9000", Some("/v2/upload"))],
        );
        assert_eq!(registry.lookup("upload").unwrap().path, "/v2/upload");
    }

    #[test]
    fn empty_config_yields_empty_registry() {
        let registry = ActionRegistry::from_config("/actions", &[]);
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}

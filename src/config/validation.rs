//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check handler registrations are unique and addressable
//! - Validate value ranges (timeouts > 0, body limit > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::GatewayConfig;
use std::net::SocketAddr;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyActionName { index: usize },
    DuplicateAction { action: String },
    InvalidAddress { context: String, address: String },
    InvalidActionsPath { path: String },
    ZeroBodyLimit,
    ZeroTimeout,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyActionName { index } => {
                write!(f, "handlers[{}]: action name must not be empty", index)
            }
            ValidationError::DuplicateAction { action } => {
                write!(f, "duplicate handler for action `{}`", action)
            }
            ValidationError::InvalidAddress { context, address } => {
                write!(f, "{}: `{}` is not a valid host:port address", context, address)
            }
            ValidationError::InvalidActionsPath { path } => {
                write!(f, "actions.path `{}` must start with '/'", path)
            }
            ValidationError::ZeroBodyLimit => {
                write!(f, "actions.max_body_size must be greater than zero")
            }
            ValidationError::ZeroTimeout => {
                write!(f, "timeouts.request_secs must be greater than zero")
            }
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.actions.path.starts_with('/') {
        errors.push(ValidationError::InvalidActionsPath {
            path: config.actions.path.clone(),
        });
    }
    if config.actions.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut seen = std::collections::HashSet::new();
    for (index, handler) in config.handlers.iter().enumerate() {
        if handler.action.is_empty() {
            errors.push(ValidationError::EmptyActionName { index });
        } else if !seen.insert(handler.action.as_str()) {
            errors.push(ValidationError::DuplicateAction {
                action: handler.action.clone(),
            });
        }
        if handler.address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                context: format!("handlers[{}]", index),
                address: handler.address.clone(),
            });
        }
    }

    if let Some(upstream) = &config.upstream {
        if upstream.address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                context: "upstream".to_string(),
                address: upstream.address.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Rewritten request (action name from interceptor)
//!     → registry.rs (action name → HandlerRoute lookup)
//!     → Return: matched route or explicit no-match
//!
//! Registry Compilation (at startup):
//!     HandlerConfig[]
//!     → Resolve handler paths
//!     → Freeze as immutable ActionRegistry
//! ```
//!
//! # Design Decisions
//! - Registry compiled at startup, immutable at runtime
//! - Deterministic: same action name always resolves the same handler
//! - Unknown actions are an explicit 404, never a fallback handler

pub mod registry;

pub use registry::{ActionRegistry, HandlerRoute};

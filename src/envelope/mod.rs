//! Action envelope subsystem.
//!
//! # Data Flow
//! ```text
//! Raw webhook body (bytes)
//!     → rewriter.rs (parse, validate arity, inject actionPayload)
//!     → Rewritten { body, action_name }
//!
//! payload.rs: typed envelope view for handlers that inspect actionPayload
//! ```
//!
//! # Design Decisions
//! - Rewriting is a pure function; all state is request-local
//! - Structured errors carry the offending action name for rejection messages
//! - The embedded copy is re-derived from the raw bytes, never shared

pub mod payload;
pub mod rewriter;

pub use payload::{ActionEnvelope, ActionRef};
pub use rewriter::{rewrite, RewriteError, Rewritten, ACTION_PAYLOAD_KEY};

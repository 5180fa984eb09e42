//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/actions.rs (gate check, buffer, rewrite, substitute body)
//!     → server.rs dispatch (action name → handler lookup, forward)
//!     → response relayed to client
//!
//! On rewrite failure:
//!     → response.rs (400 with engine-shaped JSON error, downstream skipped)
//! ```

pub mod body;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use body::BufferedBody;
pub use request::{ActionContext, X_REQUEST_ID};
pub use response::ActionError;
pub use server::GatewayServer;

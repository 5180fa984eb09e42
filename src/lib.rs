//! Actions Gateway
//!
//! An HTTP gateway that adapts the webhook envelope emitted by a GraphQL
//! action-dispatch engine into the plain argument object business handlers
//! expect.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                 ACTIONS GATEWAY                   │
//!                    │                                                   │
//!  Engine webhook    │  ┌──────────┐   ┌───────────┐   ┌────────────┐   │
//!  ──────────────────┼─▶│   http   │──▶│ envelope  │──▶│  routing   │   │
//!  POST /actions     │  │  server  │   │ rewriter  │   │  registry  │   │
//!                    │  └──────────┘   └───────────┘   └─────┬──────┘   │
//!                    │                                       │          │
//!                    │                                       ▼          │
//!  Handler response  │                                ┌────────────┐    │
//!  ◀─────────────────┼────────────────────────────────│  dispatch  │◀───┼── Action
//!                    │                                │  (forward) │    │   Handler
//!                    │                                └────────────┘    │
//!                    │                                                   │
//!                    │  Cross-cutting: config, observability, lifecycle  │
//!                    └──────────────────────────────────────────────────┘
//! ```
//!
//! The interceptor rewrites `{"input":{"args":{...}},"action":{"name":"x"}}`
//! into the bare argument object with the full envelope injected under
//! `actionPayload`, then dispatch forwards it to the handler registered for
//! the action name. Unrelated traffic passes through untouched.

pub mod config;
pub mod envelope;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use envelope::{rewrite, RewriteError, Rewritten, ACTION_PAYLOAD_KEY};
pub use http::{ActionContext, ActionError, BufferedBody, GatewayServer};
pub use lifecycle::Shutdown;

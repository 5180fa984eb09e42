//! Request middleware.

pub mod actions;

pub use actions::action_interceptor;

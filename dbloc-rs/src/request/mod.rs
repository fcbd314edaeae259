//! Requests (queries, commands) and handler-as-type.

pub mod commands;
pub mod handler;

pub use commands::{Command, Query, Request};
pub use handler::{BoxedHandler, Construct, Decorator, Handler};

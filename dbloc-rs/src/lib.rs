//! dbloc for Rust: bind queries and commands to handler types, decorate them, execute them.
//!
//! ```ignore
//! let ctx = ConfigurationContext::new();
//! let factory = TypeFactory::new(ctx.clone());
//! factory
//!     .for_query::<GetGreeting>().set_handler::<GetGreetingHandler>()
//!     .decorate_with::<LoggingDecorator>()?;
//! let greeting = QueryExecutor::new(factory).execute(GetGreeting).await?;
//! ```

// Lets the derive macros name `::dbloc_rs` from inside this crate too.
extern crate self as dbloc_rs;

pub mod core;
pub mod localization;
pub mod logging;
pub mod request;

pub use crate::core::{
    Binder, CommandExecutor, Executor, FromResolver, HandlerOf, Inject, OrDefault, QueryExecutor, TypeFactory,
};
pub use async_trait::async_trait;
pub use dbloc_core::{
    Binding, ConfigurationContext, ContextBuilder, HandlerError, MediatorError, RequestKind, Resolver, Settings,
    TypeKey,
};
pub use dbloc_rs_macros::{Command, Query};
pub use localization::LocalizationProvider;
pub use request::{BoxedHandler, Command, Construct, Decorator, Handler, Query, Request};

//! Core: TypeFactory (binding + resolution), executors, constructor injection.

pub mod executor;
pub mod inject;
pub mod type_factory;

pub use executor::{CommandExecutor, Executor, QueryExecutor};
pub use inject::{FromResolver, HandlerOf, Inject, OrDefault};
pub use type_factory::{Binder, TypeFactory};

//! Executors: resolve the handler for a request's type and run it.
//! No retry, timeout or cancellation; handler errors pass through tagged with the request type.

use dbloc_core::{MediatorError, TypeKey};
use tracing::{debug, debug_span, warn, Instrument};

use super::type_factory::TypeFactory;
use crate::request::{Command, Query, Request};

/// Runs any request (query or command).
#[derive(Clone, Debug)]
pub struct Executor {
    factory: TypeFactory,
}

impl Executor {
    pub fn new(factory: TypeFactory) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &TypeFactory {
        &self.factory
    }

    pub async fn execute<R: Request>(&self, request: R) -> Result<R::Output, MediatorError> {
        let request_type = TypeKey::of::<R>();
        let handler = self.factory.get_handler::<R>().map_err(|e| {
            warn!(request = %request_type, error = %e, "resolution failed");
            e
        })?;
        let span = debug_span!("execute", request = request_type.short_name());
        async move {
            debug!("handler resolved");
            handler
                .execute(request)
                .await
                .map_err(|source| MediatorError::HandlerExecution {
                    request: request_type.name(),
                    source,
                })
        }
        .instrument(span)
        .await
    }

    /// Blocking variant for synchronous callers. Spins up a current-thread runtime;
    /// from inside another tokio runtime it fails with `BlockingInRuntime`.
    pub fn execute_blocking<R: Request>(&self, request: R) -> Result<R::Output, MediatorError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(MediatorError::BlockingInRuntime {
                request: std::any::type_name::<R>(),
            });
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.execute(request))
    }
}

impl From<TypeFactory> for Executor {
    fn from(factory: TypeFactory) -> Self {
        Self::new(factory)
    }
}

/// Runs queries only.
#[derive(Clone, Debug)]
pub struct QueryExecutor {
    inner: Executor,
}

impl QueryExecutor {
    pub fn new(factory: TypeFactory) -> Self {
        Self {
            inner: Executor::new(factory),
        }
    }

    pub async fn execute<Q: Query>(&self, query: Q) -> Result<Q::Output, MediatorError> {
        self.inner.execute(query).await
    }

    pub fn execute_blocking<Q: Query>(&self, query: Q) -> Result<Q::Output, MediatorError> {
        self.inner.execute_blocking(query)
    }
}

/// Runs commands only.
#[derive(Clone, Debug)]
pub struct CommandExecutor {
    inner: Executor,
}

impl CommandExecutor {
    pub fn new(factory: TypeFactory) -> Self {
        Self {
            inner: Executor::new(factory),
        }
    }

    pub async fn execute<C: Command>(&self, command: C) -> Result<C::Output, MediatorError> {
        self.inner.execute(command).await
    }

    pub fn execute_blocking<C: Command>(&self, command: C) -> Result<C::Output, MediatorError> {
        self.inner.execute_blocking(command)
    }
}

//! dbloc core: request registry, service container, resolver and configuration context.
//! Type-erased; the typed query/command API lives in dbloc-rs.

pub mod container;
pub mod context;
pub mod registry;
pub mod resolver;
pub mod settings;
pub mod type_key;

pub use container::Container;
pub use context::{ConfigurationContext, ContextBuilder, DisableCallback};
pub use registry::{Binding, Decoration, DecoratorFactory, ErasedHandler, HandlerFactory, Registry, RequestKind};
pub use resolver::{Resolved, Resolver, MAX_RESOLUTION_DEPTH};
pub use settings::Settings;
pub use type_key::TypeKey;

use thiserror::Error;

/// Error raised by a handler or decorator body. Kept intact by the executor.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum MediatorError {
    #[error("no handler bound for request `{request}`")]
    BindingNotFound { request: &'static str },
    #[error("cannot resolve dependency `{dependency}` while constructing `{target}`")]
    DependencyResolution {
        dependency: &'static str,
        target: &'static str,
    },
    #[error("handler `{handler}` does not match the signature of request `{request}`")]
    HandlerTypeMismatch {
        request: &'static str,
        handler: &'static str,
    },
    #[error("resolution depth exceeded while constructing `{target}` (dependency cycle?)")]
    ResolutionDepthExceeded { target: &'static str },
    #[error("handler for `{request}` failed: {source}")]
    HandlerExecution {
        request: &'static str,
        #[source]
        source: HandlerError,
    },
    #[error("cannot block on `{request}` from inside an async runtime; use `execute` instead")]
    BlockingInRuntime { request: &'static str },
    #[error("invalid settings: {0}")]
    Settings(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediatorError {
    /// True for failures raised before any handler body ran.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            MediatorError::BindingNotFound { .. }
                | MediatorError::DependencyResolution { .. }
                | MediatorError::HandlerTypeMismatch { .. }
                | MediatorError::ResolutionDepthExceeded { .. }
        )
    }

    /// Request type a failure is attached to, when known.
    pub fn request(&self) -> Option<&'static str> {
        match self {
            MediatorError::BindingNotFound { request }
            | MediatorError::HandlerTypeMismatch { request, .. }
            | MediatorError::HandlerExecution { request, .. }
            | MediatorError::BlockingInRuntime { request } => Some(*request),
            _ => None,
        }
    }
}

//! Resolver: turns a binding into a constructed, decorated handler and feeds
//! constructor parameters from the dependency sources.
//!
//! Source order for a parameter of type `T`:
//! 1. the configuration context itself (`Arc<ConfigurationContext>`, or its `Settings`),
//! 2. services registered in the context's container,
//! 3. `T::default()`, only when the caller asks for it (`resolve_or_default`).

use std::any::Any;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::context::ConfigurationContext;
use crate::registry::{Binding, ErasedHandler};
use crate::type_key::TypeKey;
use crate::MediatorError;

/// Nested constructions deeper than this fail with `ResolutionDepthExceeded`.
pub const MAX_RESOLUTION_DEPTH: usize = 32;

/// Resolution scope: the context plus the type currently being constructed.
pub struct Resolver<'a> {
    context: &'a Arc<ConfigurationContext>,
    target: TypeKey,
    depth: usize,
}

/// Result of resolving a request type: the binding snapshot it was built from and the outermost instance.
pub struct Resolved {
    pub binding: Arc<Binding>,
    pub handler: ErasedHandler,
}

impl<'a> Resolver<'a> {
    /// Root scope, used by the executor.
    pub fn new(context: &'a Arc<ConfigurationContext>) -> Self {
        Self {
            context,
            target: TypeKey::of::<ConfigurationContext>(),
            depth: 0,
        }
    }

    pub fn context(&self) -> &'a Arc<ConfigurationContext> {
        self.context
    }

    /// Type being constructed in this scope (named in resolution errors).
    pub fn target(&self) -> TypeKey {
        self.target
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Child scope for constructing `target`.
    pub fn nested(&self, target: TypeKey) -> Result<Resolver<'a>, MediatorError> {
        if self.depth >= MAX_RESOLUTION_DEPTH {
            return Err(MediatorError::ResolutionDepthExceeded {
                target: target.name(),
            });
        }
        Ok(Resolver {
            context: self.context,
            target,
            depth: self.depth + 1,
        })
    }

    /// Context first, then container. `Ok(None)` when neither has `T`.
    pub fn try_resolve<T: Clone + Send + Sync + 'static>(&self) -> Result<Option<T>, MediatorError> {
        if let Some(context) = (self.context as &dyn Any).downcast_ref::<T>() {
            return Ok(Some(context.clone()));
        }
        if let Some(settings) = (self.context.settings() as &dyn Any).downcast_ref::<T>() {
            return Ok(Some(settings.clone()));
        }
        self.context.services().resolve::<T>(self)
    }

    /// Like `try_resolve`, but a missing `T` is a `DependencyResolution` error.
    pub fn resolve<T: Clone + Send + Sync + 'static>(&self) -> Result<T, MediatorError> {
        self.try_resolve::<T>()?
            .ok_or_else(|| MediatorError::DependencyResolution {
                dependency: std::any::type_name::<T>(),
                target: self.target.name(),
            })
    }

    /// Like `try_resolve`, falling back to `T::default()`.
    pub fn resolve_or_default<T: Clone + Default + Send + Sync + 'static>(&self) -> Result<T, MediatorError> {
        Ok(self.try_resolve::<T>()?.unwrap_or_default())
    }

    /// Construct the handler bound to `request` and fold its decorators over it,
    /// in registration order. Works on one binding snapshot.
    pub fn resolve_request(&self, request: TypeKey) -> Result<Resolved, MediatorError> {
        let binding = self
            .context
            .registry()
            .lookup(request)
            .ok_or(MediatorError::BindingNotFound {
                request: request.name(),
            })?;

        let scope = self.nested(binding.handler())?;
        let mut handler = (binding.factory())(&scope)?;
        trace!(request = %request, handler = %binding.handler(), "handler constructed");

        for decoration in binding.decorations() {
            let scope = self.nested(decoration.decorator())?;
            handler = (decoration.factory())(&scope, handler)?;
            trace!(request = %request, decorator = %decoration.decorator(), "decorator applied");
        }

        if self.context.diagnostics_enabled() {
            debug!(
                request = %request,
                handler = %binding.handler(),
                decorators = binding.decorations().len(),
                "request resolved"
            );
        }
        Ok(Resolved { binding, handler })
    }
}

//! Type factory: typed view over the context's registry.
//! `.for_query::<Q>().set_handler::<H>().decorate_with::<D>()?` then `get_handler::<Q>()`.

use std::marker::PhantomData;
use std::sync::Arc;

use dbloc_core::{
    Binding, ConfigurationContext, Decoration, DecoratorFactory, ErasedHandler, HandlerFactory, MediatorError,
    RequestKind, Resolver, TypeKey,
};

use crate::core::inject::FromResolver;
use crate::request::{BoxedHandler, Command, Construct, Decorator, Handler, Query, Request};

/// Registers and resolves handlers in one configuration context. Cheap to clone;
/// clones share the context's registry.
#[derive(Clone, Debug)]
pub struct TypeFactory {
    context: Arc<ConfigurationContext>,
}

impl TypeFactory {
    pub fn new(context: Arc<ConfigurationContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Arc<ConfigurationContext> {
        &self.context
    }

    pub fn for_query<Q: Query>(&self) -> Binder<'_, Q> {
        Binder::new(self, RequestKind::Query)
    }

    pub fn for_command<C: Command>(&self) -> Binder<'_, C> {
        Binder::new(self, RequestKind::Command)
    }

    /// Bound handler type for `R`, `None` when unbound. Constructs nothing.
    pub fn handler_type<R: Request>(&self) -> Option<TypeKey> {
        self.context.registry().lookup_handler_type(TypeKey::of::<R>())
    }

    /// Current binding for `R`, `None` when unbound.
    pub fn binding<R: Request>(&self) -> Option<Arc<Binding>> {
        self.context.registry().lookup(TypeKey::of::<R>())
    }

    /// Construct the handler chain for `R` (outermost decorator first in the call path).
    pub fn get_handler<R: Request>(&self) -> Result<BoxedHandler<R>, MediatorError> {
        resolve_handler::<R>(&Resolver::new(&self.context))
    }
}

impl From<Arc<ConfigurationContext>> for TypeFactory {
    fn from(context: Arc<ConfigurationContext>) -> Self {
        Self::new(context)
    }
}

impl From<&Arc<ConfigurationContext>> for TypeFactory {
    fn from(context: &Arc<ConfigurationContext>) -> Self {
        Self::new(Arc::clone(context))
    }
}

pub(crate) fn resolve_handler<R: Request>(resolver: &Resolver<'_>) -> Result<BoxedHandler<R>, MediatorError> {
    let request = TypeKey::of::<R>();
    let resolved = resolver.resolve_request(request)?;
    let outermost = resolved.binding.outermost();
    resolved
        .handler
        .downcast::<BoxedHandler<R>>()
        .map(|boxed| *boxed)
        .map_err(|_| MediatorError::HandlerTypeMismatch {
            request: request.name(),
            handler: outermost.name(),
        })
}

/// Binder scoped to request type `R`. Chain into the next request with `for_query` / `for_command`.
pub struct Binder<'f, R: Request> {
    factory: &'f TypeFactory,
    kind: RequestKind,
    _request: PhantomData<fn() -> R>,
}

impl<'f, R: Request> Binder<'f, R> {
    fn new(factory: &'f TypeFactory, kind: RequestKind) -> Self {
        Self {
            factory,
            kind,
            _request: PhantomData,
        }
    }

    /// Bind `H` as the only handler for `R`; replaces any earlier binding and its decorators.
    pub fn set_handler<H>(self) -> Self
    where
        H: Handler<R> + Construct,
    {
        self.set_handler_with(|r: &Resolver<'_>| {
            let deps = <H as Construct>::Deps::from_resolver(r)?;
            Ok(H::construct(deps))
        })
    }

    /// Bind `H` built by an explicit factory closure.
    pub fn set_handler_with<H, F>(self, f: F) -> Self
    where
        H: Handler<R>,
        F: Fn(&Resolver<'_>) -> Result<H, MediatorError> + Send + Sync + 'static,
    {
        let factory: HandlerFactory = Arc::new(move |r: &Resolver<'_>| {
            let handler: BoxedHandler<R> = Box::new(f(r)?);
            Ok(Box::new(handler) as ErasedHandler)
        });
        let binding = Binding::new(TypeKey::of::<R>(), self.kind, TypeKey::of::<H>(), factory);
        self.factory.context.registry().register(binding);
        self
    }

    /// Wrap the current handler chain of `R` in `D`. Fails with `BindingNotFound` when `R` is unbound.
    pub fn decorate_with<D>(self) -> Result<Self, MediatorError>
    where
        D: Decorator<R>,
    {
        let request = TypeKey::of::<R>();
        let decorator = TypeKey::of::<D>();
        let factory: DecoratorFactory = Arc::new(move |r: &Resolver<'_>, inner: ErasedHandler| {
            let inner = inner
                .downcast::<BoxedHandler<R>>()
                .map_err(|_| MediatorError::HandlerTypeMismatch {
                    request: request.name(),
                    handler: decorator.name(),
                })?;
            let deps = <D as Decorator<R>>::Deps::from_resolver(r)?;
            let decorated: BoxedHandler<R> = Box::new(D::decorate(*inner, deps));
            Ok(Box::new(decorated) as ErasedHandler)
        });
        self.factory
            .context
            .registry()
            .decorate(request, Decoration::new(decorator, factory))?;
        Ok(self)
    }

    pub fn handler_type(&self) -> Option<TypeKey> {
        self.factory.handler_type::<R>()
    }

    pub fn for_query<Q: Query>(self) -> Binder<'f, Q> {
        self.factory.for_query::<Q>()
    }

    pub fn for_command<C: Command>(self) -> Binder<'f, C> {
        self.factory.for_command::<C>()
    }
}

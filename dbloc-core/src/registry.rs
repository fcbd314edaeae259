//! Handler registry: request type -> binding (handler factory + decorator chain).
//! Bindings are swapped copy-on-write under one write lock, so a reader sees
//! either the old or the new binding, never a half-built decorator chain.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::resolver::Resolver;
use crate::type_key::TypeKey;
use crate::MediatorError;

/// Constructed handler, type-erased. The typed facade stores a boxed trait object inside.
pub type ErasedHandler = Box<dyn Any + Send>;

/// Builds the innermost handler for a binding.
pub type HandlerFactory =
    Arc<dyn Fn(&Resolver<'_>) -> Result<ErasedHandler, MediatorError> + Send + Sync>;

/// Wraps an already built handler (or decorator) into a decorator.
pub type DecoratorFactory =
    Arc<dyn Fn(&Resolver<'_>, ErasedHandler) -> Result<ErasedHandler, MediatorError> + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Query,
    Command,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Query => f.write_str("query"),
            RequestKind::Command => f.write_str("command"),
        }
    }
}

/// One decorator in a chain.
#[derive(Clone)]
pub struct Decoration {
    decorator: TypeKey,
    factory: DecoratorFactory,
}

impl Decoration {
    pub fn new(decorator: TypeKey, factory: DecoratorFactory) -> Self {
        Self { decorator, factory }
    }

    pub fn decorator(&self) -> TypeKey {
        self.decorator
    }

    pub fn factory(&self) -> &DecoratorFactory {
        &self.factory
    }
}

/// Request type bound to a handler type and its decorators (registration order).
#[derive(Clone)]
pub struct Binding {
    request: TypeKey,
    kind: RequestKind,
    handler: TypeKey,
    factory: HandlerFactory,
    decorators: Vec<Decoration>,
}

impl Binding {
    pub fn new(request: TypeKey, kind: RequestKind, handler: TypeKey, factory: HandlerFactory) -> Self {
        Self {
            request,
            kind,
            handler,
            factory,
            decorators: Vec::new(),
        }
    }

    pub fn request(&self) -> TypeKey {
        self.request
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn handler(&self) -> TypeKey {
        self.handler
    }

    pub fn factory(&self) -> &HandlerFactory {
        &self.factory
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorators
    }

    /// Decorator types in registration order (innermost first).
    pub fn decorators(&self) -> Vec<TypeKey> {
        self.decorators.iter().map(Decoration::decorator).collect()
    }

    /// Type the executor actually calls: last registered decorator, or the handler.
    pub fn outermost(&self) -> TypeKey {
        self.decorators
            .last()
            .map(Decoration::decorator)
            .unwrap_or(self.handler)
    }

    fn with_decoration(&self, decoration: Decoration) -> Self {
        let mut next = self.clone();
        next.decorators.push(decoration);
        next
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("request", &self.request)
            .field("kind", &self.kind)
            .field("handler", &self.handler)
            .field("decorators", &self.decorators())
            .finish()
    }
}

/// Registry of bindings for one configuration scope.
pub struct Registry {
    bindings: RwLock<HashMap<TypeKey, Arc<Binding>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            bindings: RwLock::new(HashMap::new()),
        }
    }

    /// Bind (or rebind) a request type. Last registration wins; the replaced binding is returned.
    pub fn register(&self, binding: Binding) -> Option<Arc<Binding>> {
        let request = binding.request;
        let handler = binding.handler;
        let previous = self.bindings.write().insert(request, Arc::new(binding));
        debug!(
            request = %request,
            handler = %handler,
            replaced = previous.is_some(),
            "handler bound"
        );
        previous
    }

    /// Append a decorator to the existing binding of `request`.
    pub fn decorate(&self, request: TypeKey, decoration: Decoration) -> Result<Arc<Binding>, MediatorError> {
        let decorator = decoration.decorator;
        let mut bindings = self.bindings.write();
        let current = bindings
            .get(&request)
            .ok_or(MediatorError::BindingNotFound {
                request: request.name(),
            })?;
        let next = Arc::new(current.with_decoration(decoration));
        bindings.insert(request, Arc::clone(&next));
        drop(bindings);
        debug!(
            request = %request,
            decorator = %decorator,
            depth = next.decorators.len(),
            "decorator added"
        );
        Ok(next)
    }

    /// Current binding snapshot. `None` is a normal outcome.
    pub fn lookup(&self, request: TypeKey) -> Option<Arc<Binding>> {
        self.bindings.read().get(&request).cloned()
    }

    /// Bound handler type, without constructing anything.
    pub fn lookup_handler_type(&self, request: TypeKey) -> Option<TypeKey> {
        self.bindings.read().get(&request).map(|b| b.handler)
    }

    pub fn remove(&self, request: TypeKey) -> Option<Arc<Binding>> {
        self.bindings.write().remove(&request)
    }

    pub fn contains(&self, request: TypeKey) -> bool {
        self.bindings.read().contains_key(&request)
    }

    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }

    /// All bound request types, sorted by name.
    pub fn request_types(&self) -> Vec<TypeKey> {
        let mut keys: Vec<TypeKey> = self.bindings.read().keys().copied().collect();
        keys.sort_by_key(|k| k.name());
        keys
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("bindings", &self.request_types())
            .finish()
    }
}

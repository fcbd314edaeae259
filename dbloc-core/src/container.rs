//! Service container: register instance or factory by type, resolve by type.
//! Second dependency source for handler constructors, after the configuration context.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::resolver::Resolver;
use crate::type_key::TypeKey;
use crate::MediatorError;

type ServiceFactory =
    Arc<dyn Fn(&Resolver<'_>) -> Result<Box<dyn Any + Send + Sync>, MediatorError> + Send + Sync>;

#[derive(Clone)]
enum Registration {
    /// Shared value, cloned out on every resolve.
    Instance(Arc<dyn Any + Send + Sync>),
    /// Called on every resolve; may resolve its own dependencies.
    Factory(ServiceFactory),
}

pub struct Container {
    services: RwLock<HashMap<TypeId, (TypeKey, Registration)>>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            services: RwLock::new(HashMap::new()),
        }
    }

    /// Register a ready-made value. Replaces any earlier registration for `T`.
    pub fn register_instance<T: Clone + Send + Sync + 'static>(&self, value: T) {
        self.services.write().insert(
            TypeId::of::<T>(),
            (TypeKey::of::<T>(), Registration::Instance(Arc::new(value))),
        );
    }

    /// Register a factory producing a fresh `T` per resolve.
    pub fn register_factory<T, F>(&self, f: F)
    where
        T: Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<T, MediatorError> + Send + Sync + 'static,
    {
        let factory: ServiceFactory = Arc::new(move |r: &Resolver<'_>| {
            let value = f(r)?;
            Ok(Box::new(value) as Box<dyn Any + Send + Sync>)
        });
        self.services.write().insert(
            TypeId::of::<T>(),
            (TypeKey::of::<T>(), Registration::Factory(factory)),
        );
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.services.read().contains_key(&TypeId::of::<T>())
    }

    pub fn remove<T: 'static>(&self) -> bool {
        self.services.write().remove(&TypeId::of::<T>()).is_some()
    }

    /// Registered service types, sorted by name.
    pub fn service_types(&self) -> Vec<TypeKey> {
        let mut keys: Vec<TypeKey> = self.services.read().values().map(|(k, _)| *k).collect();
        keys.sort_by_key(|k| k.name());
        keys
    }

    /// Resolve `T`. `Ok(None)` when nothing is registered for it.
    /// The lock is released before a factory runs, so factories may resolve other services.
    pub fn resolve<T: Clone + Send + Sync + 'static>(
        &self,
        resolver: &Resolver<'_>,
    ) -> Result<Option<T>, MediatorError> {
        let registration = match self.services.read().get(&TypeId::of::<T>()) {
            Some((_, registration)) => registration.clone(),
            None => return Ok(None),
        };
        match registration {
            Registration::Instance(value) => Ok(value.downcast_ref::<T>().cloned()),
            Registration::Factory(factory) => {
                let nested = resolver.nested(TypeKey::of::<T>())?;
                let value = factory(&nested)?;
                Ok(value.downcast::<T>().ok().map(|boxed| *boxed))
            }
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("services", &self.service_types())
            .finish()
    }
}

//! Constructor parameters: each type here knows how to pull itself out of a `Resolver`.
//! A handler's `Deps` is one of these or a tuple of them.

use std::ops::Deref;
use std::sync::Arc;

use dbloc_core::{ConfigurationContext, MediatorError, Resolver, Settings};

use crate::core::type_factory::resolve_handler;
use crate::request::{BoxedHandler, Request};

pub trait FromResolver: Sized {
    fn from_resolver(resolver: &Resolver<'_>) -> Result<Self, MediatorError>;
}

impl FromResolver for () {
    fn from_resolver(_resolver: &Resolver<'_>) -> Result<Self, MediatorError> {
        Ok(())
    }
}

/// The configuration context the handler is resolved in (same instance).
impl FromResolver for Arc<ConfigurationContext> {
    fn from_resolver(resolver: &Resolver<'_>) -> Result<Self, MediatorError> {
        Ok(Arc::clone(resolver.context()))
    }
}

impl FromResolver for Settings {
    fn from_resolver(resolver: &Resolver<'_>) -> Result<Self, MediatorError> {
        Ok(resolver.context().settings().clone())
    }
}

/// Service from the context or its container. Missing service is a `DependencyResolution` error.
#[derive(Clone, Debug)]
pub struct Inject<T>(pub T);

impl<T: Clone + Send + Sync + 'static> FromResolver for Inject<T> {
    fn from_resolver(resolver: &Resolver<'_>) -> Result<Self, MediatorError> {
        resolver.resolve::<T>().map(Inject)
    }
}

impl<T> Deref for Inject<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> Inject<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Like `Inject`, but falls back to `T::default()`.
#[derive(Clone, Debug, Default)]
pub struct OrDefault<T>(pub T);

impl<T: Clone + Default + Send + Sync + 'static> FromResolver for OrDefault<T> {
    fn from_resolver(resolver: &Resolver<'_>) -> Result<Self, MediatorError> {
        resolver.resolve_or_default::<T>().map(OrDefault)
    }
}

impl<T> Deref for OrDefault<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> OrDefault<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Resolved handler chain of another bound request type.
/// An unbound `R` is a `DependencyResolution` error on the type being constructed.
pub struct HandlerOf<R: Request>(pub BoxedHandler<R>);

impl<R: Request> FromResolver for HandlerOf<R> {
    fn from_resolver(resolver: &Resolver<'_>) -> Result<Self, MediatorError> {
        match resolve_handler::<R>(resolver) {
            Ok(handler) => Ok(HandlerOf(handler)),
            Err(MediatorError::BindingNotFound { .. }) => Err(MediatorError::DependencyResolution {
                dependency: std::any::type_name::<R>(),
                target: resolver.target().name(),
            }),
            Err(e) => Err(e),
        }
    }
}

impl<R: Request> Deref for HandlerOf<R> {
    type Target = BoxedHandler<R>;

    fn deref(&self) -> &BoxedHandler<R> {
        &self.0
    }
}

macro_rules! tuple_from_resolver {
    ($($name:ident),+) => {
        impl<$($name: FromResolver),+> FromResolver for ($($name,)+) {
            fn from_resolver(resolver: &Resolver<'_>) -> Result<Self, MediatorError> {
                Ok(($($name::from_resolver(resolver)?,)+))
            }
        }
    };
}

tuple_from_resolver!(A);
tuple_from_resolver!(A, B);
tuple_from_resolver!(A, B, C);
tuple_from_resolver!(A, B, C, D);
tuple_from_resolver!(A, B, C, D, E);
tuple_from_resolver!(A, B, C, D, E, F);
tuple_from_resolver!(A, B, C, D, E, F, G);
tuple_from_resolver!(A, B, C, D, E, F, G, H);

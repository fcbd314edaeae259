//! Handler as type: constructed by the resolver from its declared dependencies,
//! optionally wrapped in decorators, then called with the request.

use async_trait::async_trait;
use dbloc_core::HandlerError;

use crate::core::inject::FromResolver;
use crate::request::Request;

/// Handler for request `R`. Bind with `.for_query::<R>().set_handler::<Self>()` (or `for_command`).
#[async_trait]
pub trait Handler<R>: Send + Sync + 'static
where
    R: Request,
{
    async fn execute(&self, request: R) -> Result<R::Output, HandlerError>;
}

/// Handler (or decorator chain) for `R` as resolved by the type factory.
pub type BoxedHandler<R> = Box<dyn Handler<R>>;

/// Constructor of a handler. `Deps` lists the parameters, e.g. `(Arc<ConfigurationContext>, Inject<Clock>)`.
pub trait Construct: Sized {
    type Deps: FromResolver;

    fn construct(deps: Self::Deps) -> Self;
}

/// Decorator for `R`: receives the inner handler plus its own dependencies.
pub trait Decorator<R>: Handler<R> + Sized
where
    R: Request,
{
    type Deps: FromResolver;

    fn decorate(inner: BoxedHandler<R>, deps: Self::Deps) -> Self;
}

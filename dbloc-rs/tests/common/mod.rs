//! Sample queries, commands, handlers and decorators shared by the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use dbloc_rs::{
    async_trait, BoxedHandler, Command, ConfigurationContext, Construct, Decorator, Handler, HandlerError, Query,
    Settings,
};

#[derive(Debug, Query)]
#[query(output = String)]
pub struct SampleQuery;

#[derive(Debug, Command)]
pub struct SampleCommand;

pub struct SampleQueryHandler;

impl Construct for SampleQueryHandler {
    type Deps = ();

    fn construct(_: ()) -> Self {
        Self
    }
}

#[async_trait]
impl Handler<SampleQuery> for SampleQueryHandler {
    async fn execute(&self, _query: SampleQuery) -> Result<String, HandlerError> {
        Ok("Sample string".to_string())
    }
}

pub struct AnotherSampleQueryHandler;

impl Construct for AnotherSampleQueryHandler {
    type Deps = ();

    fn construct(_: ()) -> Self {
        Self
    }
}

#[async_trait]
impl Handler<SampleQuery> for AnotherSampleQueryHandler {
    async fn execute(&self, _query: SampleQuery) -> Result<String, HandlerError> {
        Ok("Another sample string".to_string())
    }
}

pub struct DecoratedSampleQueryHandler {
    inner: BoxedHandler<SampleQuery>,
}

impl Decorator<SampleQuery> for DecoratedSampleQueryHandler {
    type Deps = ();

    fn decorate(inner: BoxedHandler<SampleQuery>, _: ()) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Handler<SampleQuery> for DecoratedSampleQueryHandler {
    async fn execute(&self, query: SampleQuery) -> Result<String, HandlerError> {
        self.inner.execute(query).await?;
        Ok("set from decorator".to_string())
    }
}

fn capitalized(flag: bool) -> &'static str {
    if flag {
        "True"
    } else {
        "False"
    }
}

/// Reads the diagnostics flag from the injected context.
pub struct DecoratedSampleQueryHandlerWithAdditionalArguments {
    inner: BoxedHandler<SampleQuery>,
    context: Arc<ConfigurationContext>,
}

impl Decorator<SampleQuery> for DecoratedSampleQueryHandlerWithAdditionalArguments {
    type Deps = Arc<ConfigurationContext>;

    fn decorate(inner: BoxedHandler<SampleQuery>, context: Arc<ConfigurationContext>) -> Self {
        Self { inner, context }
    }
}

#[async_trait]
impl Handler<SampleQuery> for DecoratedSampleQueryHandlerWithAdditionalArguments {
    async fn execute(&self, query: SampleQuery) -> Result<String, HandlerError> {
        self.inner.execute(query).await?;
        Ok(format!(
            "set from decorator. from context: {}",
            capitalized(self.context.diagnostics_enabled())
        ))
    }
}

/// Same output, more constructor parameters.
pub struct DecoratedSampleQueryHandlerWithEvenMoreAdditionalArguments {
    inner: BoxedHandler<SampleQuery>,
    context: Arc<ConfigurationContext>,
    settings: Settings,
}

impl Decorator<SampleQuery> for DecoratedSampleQueryHandlerWithEvenMoreAdditionalArguments {
    type Deps = (Arc<ConfigurationContext>, Settings);

    fn decorate(inner: BoxedHandler<SampleQuery>, (context, settings): Self::Deps) -> Self {
        Self {
            inner,
            context,
            settings,
        }
    }
}

#[async_trait]
impl Handler<SampleQuery> for DecoratedSampleQueryHandlerWithEvenMoreAdditionalArguments {
    async fn execute(&self, query: SampleQuery) -> Result<String, HandlerError> {
        self.inner.execute(query).await?;
        assert_eq!(self.settings.diagnostics_enabled, self.context.diagnostics_enabled());
        Ok(format!(
            "set from decorator. from context: {}",
            capitalized(self.settings.diagnostics_enabled)
        ))
    }
}

/// Wraps the inner result as `tag(inner)`.
pub struct Tag<const N: usize> {
    inner: BoxedHandler<SampleQuery>,
}

impl<const N: usize> Decorator<SampleQuery> for Tag<N> {
    type Deps = ();

    fn decorate(inner: BoxedHandler<SampleQuery>, _: ()) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<const N: usize> Handler<SampleQuery> for Tag<N> {
    async fn execute(&self, query: SampleQuery) -> Result<String, HandlerError> {
        let inner = self.inner.execute(query).await?;
        Ok(format!("d{}({})", N, inner))
    }
}

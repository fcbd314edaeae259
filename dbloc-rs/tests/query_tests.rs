//! Binding, replacing, decorating and executing queries through the type factory.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::*;
use dbloc_core::{ErasedHandler, HandlerFactory};
use dbloc_rs::{
    Binding, ConfigurationContext, MediatorError, QueryExecutor, RequestKind, Resolver, TypeFactory, TypeKey,
};

fn factory() -> TypeFactory {
    TypeFactory::new(ConfigurationContext::new())
}

fn diagnostics_factory() -> TypeFactory {
    TypeFactory::new(ConfigurationContext::builder().diagnostics_enabled(true).build())
}

#[tokio::test]
async fn execute_query() {
    let ctx = ConfigurationContext::new();
    let factory = TypeFactory::new(ctx.clone());
    factory
        .for_query::<SampleQuery>()
        .set_handler::<SampleQueryHandler>()
        .for_command::<SampleCommand>();
    let sut = QueryExecutor::new(factory);

    let result = sut.execute(SampleQuery).await.unwrap();

    assert_eq!(result, "Sample string");
}

#[tokio::test]
async fn execute_query_decorated() {
    let sut = factory();
    sut.for_query::<SampleQuery>().set_handler::<SampleQueryHandler>();
    sut.for_query::<SampleQuery>()
        .decorate_with::<DecoratedSampleQueryHandler>()
        .unwrap();

    let result = sut.get_handler::<SampleQuery>().unwrap().execute(SampleQuery).await.unwrap();

    assert_eq!(result, "set from decorator");
}

#[tokio::test]
async fn decorated_handler_additional_constructor_parameters_should_be_able_to_create() {
    let sut = diagnostics_factory();
    sut.for_query::<SampleQuery>().set_handler::<SampleQueryHandler>();
    sut.for_query::<SampleQuery>()
        .decorate_with::<DecoratedSampleQueryHandlerWithAdditionalArguments>()
        .unwrap();

    let result = sut.get_handler::<SampleQuery>().unwrap().execute(SampleQuery).await.unwrap();

    assert_eq!(result, "set from decorator. from context: True");
}

#[tokio::test]
async fn decorated_handler_even_more_additional_constructor_parameters_should_be_able_to_create() {
    let sut = diagnostics_factory();
    sut.for_query::<SampleQuery>().set_handler::<SampleQueryHandler>();
    sut.for_query::<SampleQuery>()
        .decorate_with::<DecoratedSampleQueryHandlerWithEvenMoreAdditionalArguments>()
        .unwrap();

    let result = sut.get_handler::<SampleQuery>().unwrap().execute(SampleQuery).await.unwrap();

    assert_eq!(result, "set from decorator. from context: True");
}

#[tokio::test]
async fn context_flag_false_reaches_decorator() {
    let sut = factory();
    sut.for_query::<SampleQuery>()
        .set_handler::<SampleQueryHandler>()
        .decorate_with::<DecoratedSampleQueryHandlerWithAdditionalArguments>()
        .unwrap();

    let result = QueryExecutor::new(sut).execute(SampleQuery).await.unwrap();

    assert_eq!(result, "set from decorator. from context: False");
}

#[tokio::test]
async fn replace_registered_handler_latest_should_be_returned() {
    let sut = factory();
    sut.for_query::<SampleQuery>().set_handler::<SampleQueryHandler>();
    assert_eq!(sut.handler_type::<SampleQuery>(), Some(TypeKey::of::<SampleQueryHandler>()));

    // replacing handler
    sut.for_query::<SampleQuery>().set_handler::<AnotherSampleQueryHandler>();

    assert_eq!(
        sut.handler_type::<SampleQuery>(),
        Some(TypeKey::of::<AnotherSampleQueryHandler>())
    );
    let result = QueryExecutor::new(sut).execute(SampleQuery).await.unwrap();
    assert_eq!(result, "Another sample string");
}

#[tokio::test]
async fn replacing_handler_drops_decorators() {
    let sut = factory();
    sut.for_query::<SampleQuery>()
        .set_handler::<SampleQueryHandler>()
        .decorate_with::<DecoratedSampleQueryHandler>()
        .unwrap();
    sut.for_query::<SampleQuery>().set_handler::<AnotherSampleQueryHandler>();

    let binding = sut.binding::<SampleQuery>().unwrap();
    assert!(binding.decorators().is_empty());
    let result = QueryExecutor::new(sut).execute(SampleQuery).await.unwrap();
    assert_eq!(result, "Another sample string");
}

#[test]
fn add_handler_get_correct_type_back() {
    let sut = factory();
    sut.for_query::<SampleQuery>().set_handler::<SampleQueryHandler>();

    let result = sut.handler_type::<SampleQuery>();
    assert_eq!(result, Some(TypeKey::of::<SampleQueryHandler>()));

    let result_not_found = sut.handler_type::<SampleCommand>();
    assert!(result_not_found.is_none());
}

#[tokio::test]
async fn two_decorators_last_registered_is_outermost() {
    let sut = factory();
    sut.for_query::<SampleQuery>()
        .set_handler::<SampleQueryHandler>()
        .decorate_with::<Tag<1>>()
        .unwrap()
        .decorate_with::<Tag<2>>()
        .unwrap();

    let binding = sut.binding::<SampleQuery>().unwrap();
    assert_eq!(binding.outermost(), TypeKey::of::<Tag<2>>());

    let result = QueryExecutor::new(sut).execute(SampleQuery).await.unwrap();
    assert_eq!(result, "d2(d1(Sample string))");
}

#[test]
fn decorate_unbound_query_fails() {
    let sut = factory();
    let err = sut
        .for_query::<SampleQuery>()
        .decorate_with::<DecoratedSampleQueryHandler>()
        .err()
        .unwrap();
    assert!(matches!(err, MediatorError::BindingNotFound { .. }));
    assert!(sut.binding::<SampleQuery>().is_none());
}

#[tokio::test]
async fn resolution_is_repeatable() {
    let sut = factory();
    sut.for_query::<SampleQuery>()
        .set_handler::<SampleQueryHandler>()
        .decorate_with::<Tag<1>>()
        .unwrap();

    for _ in 0..3 {
        let out = sut.get_handler::<SampleQuery>().unwrap().execute(SampleQuery).await.unwrap();
        assert_eq!(out, "d1(Sample string)");
    }
}

#[test]
fn blocking_execution_outside_runtime() {
    let sut = factory();
    sut.for_query::<SampleQuery>().set_handler::<SampleQueryHandler>();

    let result = QueryExecutor::new(sut).execute_blocking(SampleQuery).unwrap();

    assert_eq!(result, "Sample string");
}

#[tokio::test]
async fn blocking_execution_inside_runtime_is_error() {
    let sut = factory();
    sut.for_query::<SampleQuery>().set_handler::<SampleQueryHandler>();

    let err = QueryExecutor::new(sut).execute_blocking(SampleQuery).unwrap_err();

    assert_eq!(err.request(), Some(TypeKey::of::<SampleQuery>().name()));
    match err {
        MediatorError::BlockingInRuntime { request } => assert!(request.ends_with("SampleQuery")),
        other => panic!("expected BlockingInRuntime, got {other:?}"),
    }
}

#[tokio::test]
async fn erased_binding_of_wrong_type_is_mismatch() {
    let sut = factory();
    let built = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&built);
    let wrong: HandlerFactory = Arc::new(move |_r: &Resolver<'_>| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new("not a handler".to_string()) as ErasedHandler)
    });
    sut.context().registry().register(Binding::new(
        TypeKey::of::<SampleQuery>(),
        RequestKind::Query,
        TypeKey::of::<String>(),
        wrong,
    ));

    match sut.get_handler::<SampleQuery>() {
        Err(MediatorError::HandlerTypeMismatch { request, handler }) => {
            assert_eq!(request, TypeKey::of::<SampleQuery>().name());
            assert_eq!(handler, TypeKey::of::<String>().name());
        }
        Err(other) => panic!("expected HandlerTypeMismatch, got {other:?}"),
        Ok(_) => panic!("expected HandlerTypeMismatch, got a handler"),
    }

    let err = QueryExecutor::new(sut).execute(SampleQuery).await.unwrap_err();
    assert!(err.is_resolution());
    assert!(matches!(err, MediatorError::HandlerTypeMismatch { .. }));
    assert_eq!(built.load(Ordering::SeqCst), 2);
}

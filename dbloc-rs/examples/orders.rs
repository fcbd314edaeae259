//! Example: orders as commands and queries, with a timing decorator on the query.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use dbloc_rs::{
    async_trait, BoxedHandler, Command, CommandExecutor, ConfigurationContext, Construct, Decorator, Handler,
    HandlerError, Inject, Query, QueryExecutor, TypeFactory,
};
use parking_lot::Mutex;

#[derive(Clone, Default)]
struct OrderStore(Arc<Mutex<HashMap<String, String>>>);

#[derive(Debug, Command)]
struct CreateOrder {
    order_id: String,
}

#[derive(Debug, Query)]
#[query(output = Option<String>)]
struct GetOrderStatus {
    order_id: String,
}

struct CreateOrderHandler {
    store: OrderStore,
}

impl Construct for CreateOrderHandler {
    type Deps = Inject<OrderStore>;

    fn construct(store: Inject<OrderStore>) -> Self {
        Self { store: store.into_inner() }
    }
}

#[async_trait]
impl Handler<CreateOrder> for CreateOrderHandler {
    async fn execute(&self, cmd: CreateOrder) -> Result<(), HandlerError> {
        self.store.0.lock().insert(cmd.order_id, "created".to_string());
        Ok(())
    }
}

struct GetOrderStatusHandler {
    store: OrderStore,
}

impl Construct for GetOrderStatusHandler {
    type Deps = Inject<OrderStore>;

    fn construct(store: Inject<OrderStore>) -> Self {
        Self { store: store.into_inner() }
    }
}

#[async_trait]
impl Handler<GetOrderStatus> for GetOrderStatusHandler {
    async fn execute(&self, query: GetOrderStatus) -> Result<Option<String>, HandlerError> {
        Ok(self.store.0.lock().get(&query.order_id).cloned())
    }
}

struct Timed {
    inner: BoxedHandler<GetOrderStatus>,
}

impl Decorator<GetOrderStatus> for Timed {
    type Deps = ();

    fn decorate(inner: BoxedHandler<GetOrderStatus>, _: ()) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Handler<GetOrderStatus> for Timed {
    async fn execute(&self, query: GetOrderStatus) -> Result<Option<String>, HandlerError> {
        let started = Instant::now();
        let out = self.inner.execute(query).await;
        println!("  get_order_status took {:?}", started.elapsed());
        out
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let ctx = ConfigurationContext::new();
    ctx.services().register_instance(OrderStore::default());

    let factory = TypeFactory::new(ctx);
    factory
        .for_command::<CreateOrder>()
        .set_handler::<CreateOrderHandler>()
        .for_query::<GetOrderStatus>()
        .set_handler::<GetOrderStatusHandler>()
        .decorate_with::<Timed>()?;

    let commands = CommandExecutor::new(factory.clone());
    let queries = QueryExecutor::new(factory);

    commands.execute(CreateOrder { order_id: "o-1".into() }).await?;
    let status = queries.execute(GetOrderStatus { order_id: "o-1".into() }).await?;
    println!("o-1: {}", status.as_deref().unwrap_or("unknown"));
    Ok(())
}

//! Request, Query and Command traits. Identity of a request is its type.

/// A request with a declared result type. Use `#[derive(Query)]` / `#[derive(Command)]`
/// instead of implementing this by hand.
pub trait Request: Send + Sync + 'static {
    type Output: Send + 'static;
}

/// Side-effect-free request producing `Output`.
pub trait Query: Request {}

/// Request that may change state; `Output` is `()` when it returns nothing.
pub trait Command: Request {}

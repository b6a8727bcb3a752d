//! Task-local current context for async request handling.

use std::future::Future;

use crate::correlation::context::Context;

tokio::task_local! {
    static CURRENT: Context;
}

/// Run `future` with `ctx` as the current context of its task.
pub async fn scope<F>(ctx: Context, future: F) -> F::Output
where
    F: Future,
{
    CURRENT.scope(ctx, future).await
}

/// The context installed by the enclosing [`scope`], or an empty one.
pub fn current() -> Context {
    CURRENT.try_with(Context::clone).unwrap_or_default()
}

//! Handler trait: one async invocation per dispatch, consuming its context.

use std::future::Future;

use async_trait::async_trait;
use hookbot_core::Result;

/// A registered handler. `C` is the per-dispatch context ([`crate::Context`] or
/// [`crate::CallbackContext`]); the handler owns it for the duration of the call.
///
/// Any `Fn(C) -> impl Future<Output = Result<()>>` closure is a handler.
#[async_trait]
pub trait Handler<C: Send + 'static>: Send + Sync {
    async fn handle(&self, ctx: C) -> Result<()>;
}

#[async_trait]
impl<C, F, Fut> Handler<C> for F
where
    C: Send + 'static,
    F: Fn(C) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    async fn handle(&self, ctx: C) -> Result<()> {
        (self)(ctx).await
    }
}

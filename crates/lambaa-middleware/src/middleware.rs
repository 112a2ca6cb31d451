//! Core middleware trait and types.
//!
//! A [`Middleware`] wraps the invocation of everything inside it. It receives
//! the event, the invocation context, a [`Next`] continuation and the
//! read-only [`MiddlewareContext`], and may:
//!
//! - call `next.run(..)` once and return (or post-process) its result;
//! - return without calling `next`, short-circuiting the rest of the chain;
//! - return an error, which propagates out through every enclosing `next`.
//!
//! # Example
//!
//! ```
//! use lambaa_core::{LambdaContext, Result};
//! use lambaa_middleware::{BoxFuture, Middleware, MiddlewareContext, Next};
//! use serde_json::Value;
//!
//! struct Timing;
//!
//! impl Middleware for Timing {
//!     fn name(&self) -> &'static str {
//!         "timing"
//!     }
//!
//!     fn invoke<'a>(
//!         &'a self,
//!         event: Value,
//!         context: LambdaContext,
//!         next: Next,
//!         _ctx: &'a MiddlewareContext,
//!     ) -> BoxFuture<'a, Result<Value>> {
//!         Box::pin(async move {
//!             let started = std::time::Instant::now();
//!             let result = next.run(event, context).await;
//!             tracing::debug!(elapsed = ?started.elapsed(), "handled");
//!             result
//!         })
//!     }
//! }
//! ```

use crate::context::MiddlewareContext;
use crate::types::TerminalHandler;
use lambaa_core::{LambdaContext, Result};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A boxed, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A type-erased middleware that can be shared between chains.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// The middleware capability.
///
/// Instances are built once and shared by every invocation, so they must
/// not keep per-event state in their fields.
pub trait Middleware: Send + Sync + 'static {
    /// Name used in logs and diagnostics.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Runs this middleware around `next`.
    fn invoke<'a>(
        &'a self,
        event: Value,
        context: LambdaContext,
        next: Next,
        ctx: &'a MiddlewareContext,
    ) -> BoxFuture<'a, Result<Value>>;
}

/// Continuation to the rest of the chain.
///
/// Each `Next` holds a shared reference to the chain and its own cursor, so
/// overlapping invocations of one pipeline never observe each other's
/// progress. `run` consumes the value, so the rest of the chain can be
/// entered at most once.
pub struct Next {
    chain: Arc<[BoxedMiddleware]>,
    position: usize,
    ctx: Arc<MiddlewareContext>,
    handler: TerminalHandler,
}

impl Next {
    pub(crate) fn new(
        chain: Arc<[BoxedMiddleware]>,
        ctx: Arc<MiddlewareContext>,
        handler: TerminalHandler,
    ) -> Self {
        Self {
            chain,
            position: 0,
            ctx,
            handler,
        }
    }

    /// Number of middleware still to run before the terminal handler.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.chain.len().saturating_sub(self.position)
    }

    /// Invokes the next middleware, or the terminal handler when none remain.
    pub fn run(self, event: Value, context: LambdaContext) -> BoxFuture<'static, Result<Value>> {
        Box::pin(async move {
            let Self {
                chain,
                position,
                ctx,
                handler,
            } = self;

            let Some(middleware) = chain.get(position).cloned() else {
                return handler(event, context).await;
            };

            let next = Self {
                chain,
                position: position + 1,
                ctx: Arc::clone(&ctx),
                handler,
            };
            middleware.invoke(event, context, next, &ctx).await
        })
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("position", &self.position)
            .field("remaining", &self.remaining())
            .finish_non_exhaustive()
    }
}

/// A middleware built from an async closure.
///
/// The closure receives an owned copy of the [`MiddlewareContext`].
///
/// # Example
///
/// ```
/// use lambaa_middleware::FnMiddleware;
///
/// let middleware = FnMiddleware::new("passthrough", |event, context, next, _ctx| async move {
///     next.run(event, context).await
/// });
/// ```
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F, Fut> FnMiddleware<F>
where
    F: Fn(Value, LambdaContext, Next, MiddlewareContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    /// Creates a named function middleware.
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F, Fut> Middleware for FnMiddleware<F>
where
    F: Fn(Value, LambdaContext, Next, MiddlewareContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn invoke<'a>(
        &'a self,
        event: Value,
        context: LambdaContext,
        next: Next,
        ctx: &'a MiddlewareContext,
    ) -> BoxFuture<'a, Result<Value>> {
        Box::pin((self.func)(event, context, next, ctx.clone()))
    }
}

/// Adapts an async closure into a [`Middleware`] named `fn_middleware`.
///
/// Use [`from_fn_named`] when several closure stages share a pipeline.
pub fn from_fn<F, Fut>(func: F) -> FnMiddleware<F>
where
    F: Fn(Value, LambdaContext, Next, MiddlewareContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    from_fn_named("fn_middleware", func)
}

/// Adapts an async closure into a [`Middleware`] reported as `name`.
pub fn from_fn_named<F, Fut>(name: &'static str, func: F) -> FnMiddleware<F>
where
    F: Fn(Value, LambdaContext, Next, MiddlewareContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    FnMiddleware::new(name, func)
}

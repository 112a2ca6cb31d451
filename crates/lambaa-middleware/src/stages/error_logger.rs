//! Error logging middleware.

use crate::context::MiddlewareContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use lambaa_core::{LambdaContext, Result};
use serde_json::Value;

/// Logs every error raised inside it, then re-raises it unchanged.
///
/// Register it outside [`ErrorResponseMiddleware`](super::ErrorResponseMiddleware)
/// to log failures that are later rendered as responses, or inside it to log
/// only what escapes the handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorLoggerMiddleware;

impl ErrorLoggerMiddleware {
    /// Creates the middleware.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Middleware for ErrorLoggerMiddleware {
    fn name(&self) -> &'static str {
        "error_logger"
    }

    fn invoke<'a>(
        &'a self,
        event: Value,
        context: LambdaContext,
        next: Next,
        ctx: &'a MiddlewareContext,
    ) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            let request_id = context.request_id().to_string();
            let result = next.run(event, context).await;
            if let Err(err) = &result {
                tracing::error!(
                    request_id = %request_id,
                    handler_group = ctx.destination_handler_group().unwrap_or("-"),
                    method = ctx.destination_method().unwrap_or("-"),
                    code = err.code(),
                    error = %err,
                    "event handling failed"
                );
            }
            result
        })
    }
}

//! Error response middleware.
//!
//! API Gateway expects a response payload even when handling fails. This
//! middleware converts any error raised inside it into a proxy response:
//!
//! ```json
//! {
//!   "statusCode": 404,
//!   "headers": { "Content-Type": "application/json" },
//!   "body": "{\"error\":{\"code\":\"ROUTE_NOT_FOUND\",\"message\":\"...\"}}"
//! }
//! ```
//!
//! Errors from every other event kind are re-raised so the host can retry or
//! dead-letter the batch.
//!
//! # Example
//!
//! ```rust
//! use lambaa_middleware::stages::ErrorResponseMiddleware;
//!
//! // Handler error messages are replaced by a generic message.
//! let errors = ErrorResponseMiddleware::new();
//!
//! // Development only.
//! let verbose = ErrorResponseMiddleware::new().expose_internal_errors(true);
//! ```

use crate::context::MiddlewareContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use lambaa_core::{LambdaContext, Result};
use serde_json::Value;

/// Converts errors of API Gateway events into failure responses.
#[derive(Debug, Clone, Default)]
pub struct ErrorResponseMiddleware {
    expose_internal_errors: bool,
}

impl ErrorResponseMiddleware {
    /// Creates the middleware with internal errors hidden.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Includes handler error messages in responses.
    #[must_use]
    pub const fn expose_internal_errors(mut self, expose: bool) -> Self {
        self.expose_internal_errors = expose;
        self
    }
}

impl Middleware for ErrorResponseMiddleware {
    fn name(&self) -> &'static str {
        "error_response"
    }

    fn invoke<'a>(
        &'a self,
        event: Value,
        context: LambdaContext,
        next: Next,
        ctx: &'a MiddlewareContext,
    ) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            match next.run(event, context).await {
                Err(err) if ctx.is_http() => {
                    tracing::warn!(
                        code = err.code(),
                        status = err.status_code().as_u16(),
                        error = %err,
                        "request failed"
                    );
                    Ok(err.to_api_gateway_response(self.expose_internal_errors))
                }
                other => other,
            }
        })
    }
}

//! Middleware pipeline executor.
//!
//! A [`Pipeline`] is an ordered list of middleware, outermost first. Invoking
//! it threads the event through every entry and into a terminal handler; the
//! result travels back out in reverse order:
//!
//! ```text
//! M1-pre → M2-pre → handler → M2-post → M1-post
//! ```
//!
//! The router builds one pipeline per dispatch by concatenating the global,
//! handler-group and method layers with [`Pipeline::from_layers`].

use crate::context::MiddlewareContext;
use crate::middleware::{BoxFuture, BoxedMiddleware, Middleware, Next};
use crate::types::TerminalHandler;
use lambaa_core::{LambdaContext, Result};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// An ordered middleware chain.
///
/// Cloning is cheap: entries are shared.
///
/// # Example
///
/// ```
/// use lambaa_core::LambdaContext;
/// use lambaa_middleware::{from_fn, MiddlewareContext, Pipeline};
/// use serde_json::{json, Value};
///
/// # tokio_test::block_on(async {
/// let pipeline = Pipeline::builder()
///     .middleware(from_fn(|mut event: Value, context, next, _ctx| async move {
///         event["seen"] = json!(true);
///         next.run(event, context).await
///     }))
///     .build();
///
/// let result = pipeline
///     .invoke(json!({}), LambdaContext::default(), MiddlewareContext::new(), |event, _| async move {
///         Ok(event)
///     })
///     .await
///     .unwrap();
/// assert_eq!(result["seen"], true);
/// # });
/// ```
#[derive(Clone, Default)]
pub struct Pipeline {
    stages: Vec<BoxedMiddleware>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Concatenates layers, outermost layer first.
    #[must_use]
    pub fn from_layers<'a, I>(layers: I) -> Self
    where
        I: IntoIterator<Item = &'a [BoxedMiddleware]>,
    {
        Self {
            stages: layers.into_iter().flatten().cloned().collect(),
        }
    }

    /// Number of middleware in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Names of the middleware, outermost first.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|m| m.name()).collect()
    }

    /// Runs the chain around `handler`.
    ///
    /// `handler` runs at most once, and only if every middleware passes
    /// control inward. Errors are returned unchanged unless a middleware
    /// converts them.
    pub async fn invoke<H, Fut>(
        &self,
        event: Value,
        context: LambdaContext,
        ctx: MiddlewareContext,
        handler: H,
    ) -> Result<Value>
    where
        H: FnOnce(Value, LambdaContext) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let handler: TerminalHandler = Box::new(
            move |event: Value, context: LambdaContext| -> BoxFuture<'static, Result<Value>> {
                Box::pin(handler(event, context))
            },
        );
        self.invoke_boxed(event, context, ctx, handler).await
    }

    /// Runs the chain around an already boxed terminal handler.
    pub async fn invoke_boxed(
        &self,
        event: Value,
        context: LambdaContext,
        ctx: MiddlewareContext,
        handler: TerminalHandler,
    ) -> Result<Value> {
        let chain: Arc<[BoxedMiddleware]> = self.stages.iter().cloned().collect();
        Next::new(chain, Arc::new(ctx), handler)
            .run(event, context)
            .await
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.names())
            .finish()
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    stages: Vec<BoxedMiddleware>,
}

impl PipelineBuilder {
    /// Appends a middleware (inside those already added).
    #[must_use]
    pub fn middleware<M: Middleware>(mut self, middleware: M) -> Self {
        self.stages.push(Arc::new(middleware));
        self
    }

    /// Appends an already shared middleware.
    #[must_use]
    pub fn boxed(mut self, middleware: BoxedMiddleware) -> Self {
        self.stages.push(middleware);
        self
    }

    /// Builds the pipeline.
    #[must_use]
    pub fn build(self) -> Pipeline {
        Pipeline {
            stages: self.stages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{from_fn, from_fn_named, FnMiddleware};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    type Trace = Arc<Mutex<Vec<String>>>;

    fn tracer(name: &'static str, trace: &Trace) -> BoxedMiddleware {
        let trace = Arc::clone(trace);
        Arc::new(FnMiddleware::new(
            name,
            move |event: Value, context: LambdaContext, next: Next, _ctx: MiddlewareContext| {
                let trace = Arc::clone(&trace);
                async move {
                    trace.lock().unwrap().push(format!("{name}-pre"));
                    let result = next.run(event, context).await;
                    trace.lock().unwrap().push(format!("{name}-post"));
                    result
                }
            },
        ))
    }

    struct Reject;

    impl Middleware for Reject {
        fn invoke<'a>(
            &'a self,
            _event: Value,
            _context: LambdaContext,
            _next: Next,
            _ctx: &'a MiddlewareContext,
        ) -> BoxFuture<'a, Result<Value>> {
            Box::pin(async { Ok(json!({ "statusCode": 401 })) })
        }
    }

    #[tokio::test]
    async fn test_empty_pipeline_calls_handler() {
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        let result = pipeline
            .invoke(json!(1), LambdaContext::default(), MiddlewareContext::new(), |e, _| async move { Ok(e) })
            .await
            .unwrap();
        assert_eq!(result, json!(1));
    }

    #[tokio::test]
    async fn test_layers_run_outermost_first() {
        let trace = Trace::default();
        let global = vec![tracer("M1", &trace), tracer("M2", &trace)];
        let group = vec![tracer("G1", &trace)];
        let method = vec![tracer("U1", &trace)];

        let pipeline = Pipeline::from_layers([&global[..], &group[..], &method[..]]);
        assert_eq!(pipeline.names(), vec!["M1", "M2", "G1", "U1"]);

        let handler_trace = Arc::clone(&trace);
        pipeline
            .invoke(json!({}), LambdaContext::default(), MiddlewareContext::new(), move |e, _| async move {
                handler_trace.lock().unwrap().push("handler".to_string());
                Ok(e)
            })
            .await
            .unwrap();

        assert_eq!(
            *trace.lock().unwrap(),
            vec![
                "M1-pre", "M2-pre", "G1-pre", "U1-pre", "handler", "U1-post", "G1-post", "M2-post",
                "M1-post"
            ]
        );
    }

    #[tokio::test]
    async fn test_short_circuit_skips_inner() {
        let trace = Trace::default();
        let pipeline = Pipeline::builder()
            .boxed(tracer("outer", &trace))
            .middleware(Reject)
            .boxed(tracer("inner", &trace))
            .build();

        let result = pipeline
            .invoke(json!({}), LambdaContext::default(), MiddlewareContext::new(), |_, _| async {
                Ok(json!("handler"))
            })
            .await
            .unwrap();

        assert_eq!(result, json!({ "statusCode": 401 }));
        assert_eq!(*trace.lock().unwrap(), vec!["outer-pre", "outer-post"]);
    }

    #[tokio::test]
    async fn test_error_propagates_through_outer_middleware() {
        let trace = Trace::default();
        let pipeline = Pipeline::builder().boxed(tracer("outer", &trace)).build();

        let error = pipeline
            .invoke(json!({}), LambdaContext::default(), MiddlewareContext::new(), |_, _| async {
                Err(lambaa_core::Error::msg("boom"))
            })
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "boom");
        assert_eq!(*trace.lock().unwrap(), vec!["outer-pre", "outer-post"]);
    }

    #[tokio::test]
    async fn test_named_closure_stages() {
        let pass = |event: Value, context: LambdaContext, next: Next, _ctx: MiddlewareContext| {
            next.run(event, context)
        };
        let pipeline = Pipeline::builder()
            .middleware(from_fn_named("auth", pass))
            .middleware(from_fn_named("audit", pass))
            .middleware(from_fn(pass))
            .build();
        assert_eq!(pipeline.names(), vec!["auth", "audit", "fn_middleware"]);

        let result = pipeline
            .invoke(json!({ "n": 1 }), LambdaContext::default(), MiddlewareContext::new(), |e, _| async move {
                Ok(e)
            })
            .await
            .unwrap();
        assert_eq!(result, json!({ "n": 1 }));
    }

    #[tokio::test]
    async fn test_middleware_can_recover_from_error() {
        let pipeline = Pipeline::builder()
            .middleware(from_fn(
                |event: Value, context: LambdaContext, next: Next, _ctx: MiddlewareContext| async move {
                    match next.run(event, context).await {
                        Ok(value) => Ok(value),
                        Err(err) => Ok(json!({ "recovered": err.to_string() })),
                    }
                },
            ))
            .build();

        let result = pipeline
            .invoke(json!({}), LambdaContext::default(), MiddlewareContext::new(), |_, _| async {
                Err(lambaa_core::Error::msg("boom"))
            })
            .await
            .unwrap();
        assert_eq!(result, json!({ "recovered": "boom" }));
    }

    #[tokio::test]
    async fn test_context_is_shared_by_all_middleware() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = |seen: &Arc<Mutex<Vec<Option<String>>>>| {
            let seen = Arc::clone(seen);
            from_fn(move |event: Value, context: LambdaContext, next: Next, ctx: MiddlewareContext| {
                seen.lock()
                    .unwrap()
                    .push(ctx.destination_method().map(ToString::to_string));
                next.run(event, context)
            })
        };
        let pipeline = Pipeline::builder()
            .middleware(record(&seen))
            .middleware(record(&seen))
            .build();

        pipeline
            .invoke(
                json!({}),
                LambdaContext::default(),
                MiddlewareContext::for_destination("Group", "method"),
                |e, _| async move { Ok(e) },
            )
            .await
            .unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![Some("method".to_string()), Some("method".to_string())]
        );
    }

    #[tokio::test]
    async fn test_concurrent_invocations_do_not_interfere() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let pipeline = Pipeline::builder()
            .middleware(from_fn(
                move |mut event: Value, context: LambdaContext, next: Next, _ctx: MiddlewareContext| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    event["wrapped"] = json!(true);
                    async move {
                        tokio::task::yield_now().await;
                        next.run(event, context).await
                    }
                },
            ))
            .build();

        let mut handles = Vec::new();
        for i in 0..16 {
            let pipeline = pipeline.clone();
            handles.push(tokio::spawn(async move {
                pipeline
                    .invoke(json!({ "i": i }), LambdaContext::default(), MiddlewareContext::new(), |e, _| async move {
                        Ok(e)
                    })
                    .await
            }));
        }

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.unwrap().unwrap();
            assert_eq!(result["i"], json!(i));
            assert_eq!(result["wrapped"], json!(true));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 16);
    }
}

//! The router: registration and end-to-end dispatch.

use crate::group::HandlerGroup;
use crate::resolver::{resolve, Destination};
use lambaa_config::{LambaaConfig, DEBUG_VAR};
use lambaa_core::{classify, EventCategory, LambdaContext, Result, RouterError};
use lambaa_extract::build_args;
use lambaa_middleware::{BoxFuture, BoxedMiddleware, Middleware, MiddlewareContext, Pipeline};
use lambaa_router::Params;
use lambaa_telemetry::{record_route, route_span, RouteOutcome};
use serde_json::{Map, Value};
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Label used for events no probe recognises.
const UNKNOWN_KIND: &str = "unknown";

/// Router behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Emit a debug line for every resolved event.
    pub debug: bool,
}

impl RouterConfig {
    /// Reads the `DEBUG` toggle; only `true` (any case) enables it.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            debug: env::var(DEBUG_VAR).is_ok_and(|v| v.eq_ignore_ascii_case("true")),
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl From<&LambaaConfig> for RouterConfig {
    fn from(config: &LambaaConfig) -> Self {
        Self {
            debug: config.router.debug,
        }
    }
}

#[derive(Clone, Default)]
struct RouterState {
    groups: Vec<HandlerGroup>,
    middleware: Vec<BoxedMiddleware>,
    config: RouterConfig,
}

/// Routes events to handler groups through the middleware pipeline.
///
/// Registration is builder-style; once built, the router is read-only and
/// cheap to clone, so one instance can serve concurrent invocations.
///
/// # Example
///
/// ```
/// use lambaa::{Endpoint, HandlerGroup, Router};
/// use lambaa_core::LambdaContext;
/// use serde_json::json;
///
/// struct Ping;
///
/// let router = Router::new().register_handler_group(
///     HandlerGroup::builder(Ping).endpoint("ping", Endpoint::get("/ping"), |_, _| async {
///         Ok(json!({ "statusCode": 200, "body": "pong" }))
///     }),
/// );
///
/// # tokio_test::block_on(async {
/// let event = json!({ "resource": "/ping", "httpMethod": "GET" });
/// let response = router.route(event, LambdaContext::default()).await.unwrap();
/// assert_eq!(response["body"], "pong");
/// # });
/// ```
#[derive(Clone, Default)]
pub struct Router {
    state: Arc<RouterState>,
}

impl Router {
    /// Creates a router configured from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a router with explicit configuration.
    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            state: Arc::new(RouterState {
                config,
                ..RouterState::default()
            }),
        }
    }

    /// Adds a handler group after those already registered.
    #[must_use]
    pub fn register_handler_group(mut self, group: impl Into<HandlerGroup>) -> Self {
        Arc::make_mut(&mut self.state).groups.push(group.into());
        self
    }

    /// Adds several handler groups, in order.
    #[must_use]
    pub fn register_handler_groups<I>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = HandlerGroup>,
    {
        Arc::make_mut(&mut self.state).groups.extend(groups);
        self
    }

    /// Adds global middleware, inside any registered before.
    #[must_use]
    pub fn register_middleware<M: Middleware>(self, middleware: M) -> Self {
        self.register_middlewares([Arc::new(middleware) as BoxedMiddleware])
    }

    /// Adds several global middleware, outermost first.
    #[must_use]
    pub fn register_middlewares<I>(mut self, middleware: I) -> Self
    where
        I: IntoIterator<Item = BoxedMiddleware>,
    {
        Arc::make_mut(&mut self.state).middleware.extend(middleware);
        self
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.state.config
    }

    /// Registered handler groups, in registration order.
    #[must_use]
    pub fn handler_groups(&self) -> &[HandlerGroup] {
        &self.state.groups
    }

    /// Resolves an event without running anything.
    #[must_use]
    pub fn resolve(&self, event: &Value) -> Option<Destination<'_>> {
        classify(event).and_then(|category| resolve(&self.state.groups, &category))
    }

    /// Routes one event end to end.
    ///
    /// Global middleware runs for every event. If no handler group claims the
    /// event, the innermost step fails with a route-not-found error after
    /// the global middleware has passed control inward.
    ///
    /// # Errors
    ///
    /// Returns the handler's error, a parameter extraction error, or a
    /// routing error, unless a middleware converts it.
    pub async fn route(&self, event: Value, context: LambdaContext) -> Result<Value> {
        let category = classify(&event);
        let kind = category.as_ref().map_or(UNKNOWN_KIND, |c| c.kind().name());
        let span = route_span(kind, context.request_id());
        let started = Instant::now();

        let destination = category
            .as_ref()
            .and_then(|category| resolve(&self.state.groups, category));

        let (outcome, result) = match (destination, category.as_ref()) {
            (Some(destination), Some(category)) => {
                let result = self
                    .dispatch(destination, category, event, context)
                    .instrument(span)
                    .await;
                let outcome = if result.is_ok() {
                    RouteOutcome::Handled
                } else {
                    RouteOutcome::Failed
                };
                (outcome, result)
            }
            _ => {
                let result = self
                    .reject(category.as_ref(), event, context)
                    .instrument(span)
                    .await;
                (RouteOutcome::Unroutable, result)
            }
        };

        record_route(kind, outcome, started.elapsed());
        result
    }

    /// Returns an adapter for the host runtime's entry point.
    #[must_use]
    pub fn handler(
        &self,
    ) -> impl Fn(Value, LambdaContext) -> BoxFuture<'static, Result<Value>> + Clone + Send + Sync
    {
        self.clone().into_handler()
    }

    /// Converts the router into an adapter for the host runtime's entry point.
    #[must_use]
    pub fn into_handler(
        self,
    ) -> impl Fn(Value, LambdaContext) -> BoxFuture<'static, Result<Value>> + Clone + Send + Sync
    {
        move |event: Value, context: LambdaContext| -> BoxFuture<'static, Result<Value>> {
            let router = self.clone();
            Box::pin(async move { router.route(event, context).await })
        }
    }

    async fn dispatch(
        &self,
        destination: Destination<'_>,
        category: &EventCategory,
        mut event: Value,
        context: LambdaContext,
    ) -> Result<Value> {
        let group = destination.group;
        let method = destination.method;
        inject_path_params(&mut event, &destination.path_params);

        if self.state.config.debug {
            tracing::debug!(
                handler_group = %group.name(),
                method = %method.id(),
                "routing {} to {}.{}",
                category.summary(),
                group.name(),
                method.id()
            );
        }

        let pipeline = Pipeline::from_layers([
            &self.state.middleware[..],
            group.options().middleware(),
            method.middleware(),
        ]);
        let ctx = MiddlewareContext::for_destination(group.name(), method.id())
            .with_event_kind(Some(category.kind()));

        let params = Arc::clone(method.params());
        let handler = Arc::clone(method.handler());
        pipeline
            .invoke(event, context, ctx, move |event, context| async move {
                let args = build_args(&params, event, context)?;
                handler(args).await
            })
            .await
    }

    async fn reject(
        &self,
        category: Option<&EventCategory>,
        event: Value,
        context: LambdaContext,
    ) -> Result<Value> {
        tracing::debug!(
            event = %category.map_or_else(|| "unrecognised event".to_string(), EventCategory::summary),
            "no route"
        );

        let pipeline = Pipeline::from_layers([&self.state.middleware[..]]);
        let ctx = MiddlewareContext::new().with_event_kind(category.map(EventCategory::kind));
        pipeline.invoke(event, context, ctx, route_not_found).await
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("groups", &self.state.groups)
            .field("middleware", &self.state.middleware.len())
            .field("config", &self.state.config)
            .finish()
    }
}

async fn route_not_found(_event: Value, _context: LambdaContext) -> Result<Value> {
    Err(RouterError::route_not_found().into())
}

/// Merges captured placeholders into the event's `pathParameters`.
fn inject_path_params(event: &mut Value, params: &Params) {
    if params.is_empty() {
        return;
    }
    let Some(object) = event.as_object_mut() else {
        return;
    };
    let slot = object
        .entry("pathParameters")
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(map) = slot {
        for (name, value) in params.iter() {
            map.insert(name.to_string(), Value::String(value.to_string()));
        }
    }
}

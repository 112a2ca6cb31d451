//! Handler groups and endpoint declarations.

use http::Method;
use indexmap::IndexMap;
use lambaa_core::Result;
use lambaa_extract::{Args, Param};
use lambaa_middleware::{BoxFuture, BoxedMiddleware, Middleware};
use lambaa_router::{normalize_base_path, RouteKey, RouteTable, SourceKind};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// A type-erased handler method.
pub type MethodFn = Arc<dyn Fn(Args) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// Configuration shared by every method of a group.
#[derive(Clone, Default)]
pub struct GroupOptions {
    base_path: Option<String>,
    middleware: Vec<BoxedMiddleware>,
}

impl GroupOptions {
    /// Normalized base path, applied to HTTP routes only.
    #[must_use]
    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// Group middleware, outermost first.
    #[must_use]
    pub fn middleware(&self) -> &[BoxedMiddleware] {
        &self.middleware
    }
}

impl fmt::Debug for GroupOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupOptions")
            .field("base_path", &self.base_path)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

/// Route declaration for one handler method.
///
/// # Example
///
/// ```
/// use lambaa::{Endpoint, Param};
/// use lambaa_router::RouteKey;
/// use http::Method;
///
/// let endpoint = Endpoint::get("/users/{id}")
///     .also(RouteKey::http(Method::HEAD, "/users/{id}"))
///     .param(Param::path("id").number());
///
/// assert_eq!(endpoint.keys().len(), 2);
/// assert_eq!(endpoint.params().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Endpoint {
    keys: Vec<RouteKey>,
    middleware: Vec<BoxedMiddleware>,
    params: Vec<Param>,
}

impl Endpoint {
    /// An endpoint reachable under `key`.
    #[must_use]
    pub fn new(key: RouteKey) -> Self {
        Self {
            keys: vec![key],
            ..Self::default()
        }
    }

    /// An HTTP route.
    #[must_use]
    pub fn http(method: Method, path: &str) -> Self {
        Self::new(RouteKey::http(method, path))
    }

    /// `GET path`.
    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::http(Method::GET, path)
    }

    /// `POST path`.
    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::http(Method::POST, path)
    }

    /// `PUT path`.
    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::http(Method::PUT, path)
    }

    /// `PATCH path`.
    #[must_use]
    pub fn patch(path: &str) -> Self {
        Self::http(Method::PATCH, path)
    }

    /// `DELETE path`.
    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::http(Method::DELETE, path)
    }

    /// Messages from an SQS queue.
    #[must_use]
    pub fn sqs(queue_arn: impl Into<String>) -> Self {
        Self::new(RouteKey::source(SourceKind::Sqs, queue_arn))
    }

    /// Notifications from an SNS topic.
    #[must_use]
    pub fn sns(topic_arn: impl Into<String>) -> Self {
        Self::new(RouteKey::source(SourceKind::Sns, topic_arn))
    }

    /// Invocations by a scheduler rule.
    #[must_use]
    pub fn schedule(rule_arn: impl Into<String>) -> Self {
        Self::new(RouteKey::source(SourceKind::Schedule, rule_arn))
    }

    /// Changes to a DynamoDB table; the table ARN, not the stream ARN.
    #[must_use]
    pub fn dynamodb(table_arn: impl Into<String>) -> Self {
        Self::new(RouteKey::source(SourceKind::DynamoDb, table_arn))
    }

    /// Records from a Kinesis stream.
    #[must_use]
    pub fn kinesis(stream_arn: impl Into<String>) -> Self {
        Self::new(RouteKey::source(SourceKind::Kinesis, stream_arn))
    }

    /// Notifications from an S3 bucket.
    #[must_use]
    pub fn s3(bucket_arn: impl Into<String>) -> Self {
        Self::new(RouteKey::source(SourceKind::S3, bucket_arn))
    }

    /// EventBridge events with this source and detail type, ignoring case.
    #[must_use]
    pub fn event_bridge(source: &str, detail_type: &str) -> Self {
        Self::new(RouteKey::event_bridge(source, detail_type))
    }

    /// Adds another key routing to the same method.
    #[must_use]
    pub fn also(mut self, key: RouteKey) -> Self {
        self.keys.push(key);
        self
    }

    /// Adds method middleware, inside any added before.
    #[must_use]
    pub fn with<M: Middleware>(self, middleware: M) -> Self {
        self.with_boxed(Arc::new(middleware))
    }

    /// Adds shared method middleware.
    #[must_use]
    pub fn with_boxed(mut self, middleware: BoxedMiddleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Declares the next argument slot.
    #[must_use]
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Route keys.
    #[must_use]
    pub fn keys(&self) -> &[RouteKey] {
        &self.keys
    }

    /// Parameter rules, by slot.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("keys", &self.keys)
            .field("middleware", &self.middleware.len())
            .field("params", &self.params)
            .finish()
    }
}

/// A registered handler method.
#[derive(Clone)]
pub struct HandlerMethod {
    id: String,
    middleware: Arc<[BoxedMiddleware]>,
    params: Arc<[Param]>,
    handler: MethodFn,
}

impl HandlerMethod {
    /// Method id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Method middleware, outermost first.
    #[must_use]
    pub fn middleware(&self) -> &[BoxedMiddleware] {
        &self.middleware
    }

    /// Parameter rules.
    #[must_use]
    pub fn params(&self) -> &Arc<[Param]> {
        &self.params
    }

    /// The handler.
    #[must_use]
    pub fn handler(&self) -> &MethodFn {
        &self.handler
    }
}

impl fmt::Debug for HandlerMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerMethod")
            .field("id", &self.id)
            .field("middleware", &self.middleware.len())
            .field("params", &self.params.len())
            .finish_non_exhaustive()
    }
}

/// A set of handler methods sharing a base path and middleware.
///
/// # Example
///
/// ```
/// use lambaa::{Endpoint, HandlerGroup};
/// use serde_json::json;
///
/// struct Ping;
///
/// let group = HandlerGroup::builder(Ping)
///     .base_path("/v1")
///     .endpoint("ping", Endpoint::get("/ping"), |_ping, _args| async {
///         Ok(json!({ "statusCode": 200, "body": "pong" }))
///     })
///     .build();
///
/// assert_eq!(group.name(), "Ping");
/// assert_eq!(group.options().base_path(), Some("/v1"));
/// assert!(group.method("ping").is_some());
/// ```
#[derive(Clone)]
pub struct HandlerGroup {
    name: String,
    options: GroupOptions,
    routes: RouteTable,
    methods: IndexMap<String, HandlerMethod>,
}

impl HandlerGroup {
    /// Starts declaring a group around `instance`.
    pub fn builder<T: Send + Sync + 'static>(instance: T) -> HandlerGroupBuilder<T> {
        HandlerGroupBuilder::new(instance)
    }

    /// Name of the group, by default the short type name of its instance.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Group configuration.
    #[must_use]
    pub const fn options(&self) -> &GroupOptions {
        &self.options
    }

    /// Route table.
    #[must_use]
    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Looks up a method by id.
    #[must_use]
    pub fn method(&self, id: &str) -> Option<&HandlerMethod> {
        self.methods.get(id)
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &HandlerMethod> {
        self.methods.values()
    }

    /// Returns `true` if at least one route is declared.
    #[must_use]
    pub fn is_routable(&self) -> bool {
        !self.routes.is_empty()
    }
}

impl fmt::Debug for HandlerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerGroup")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("routes", &self.routes)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`HandlerGroup`].
pub struct HandlerGroupBuilder<T> {
    instance: Arc<T>,
    name: String,
    options: GroupOptions,
    routes: RouteTable,
    methods: IndexMap<String, HandlerMethod>,
}

impl<T: Send + Sync + 'static> HandlerGroupBuilder<T> {
    fn new(instance: T) -> Self {
        Self {
            instance: Arc::new(instance),
            name: short_type_name::<T>().to_string(),
            options: GroupOptions::default(),
            routes: RouteTable::new(),
            methods: IndexMap::new(),
        }
    }

    /// Overrides the group name used in logs and the middleware context.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Prefix for every HTTP route in the group.
    #[must_use]
    pub fn base_path(mut self, base_path: &str) -> Self {
        self.options.base_path = normalize_base_path(base_path);
        self
    }

    /// Adds group middleware, inside any added before.
    #[must_use]
    pub fn middleware<M: Middleware>(self, middleware: M) -> Self {
        self.boxed_middleware(Arc::new(middleware))
    }

    /// Adds shared group middleware.
    #[must_use]
    pub fn boxed_middleware(mut self, middleware: BoxedMiddleware) -> Self {
        self.options.middleware.push(middleware);
        self
    }

    /// Declares a handler method.
    ///
    /// Re-declaring a method id replaces the earlier declaration along with
    /// its route keys. Re-declaring a route key points it at the new method.
    #[must_use]
    pub fn endpoint<F, Fut>(mut self, method_id: &str, endpoint: Endpoint, handler: F) -> Self
    where
        F: Fn(Arc<T>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let instance = Arc::clone(&self.instance);
        let handler: MethodFn =
            Arc::new(move |args: Args| -> BoxFuture<'static, Result<Value>> {
                Box::pin(handler(Arc::clone(&instance), args))
            });

        if self.methods.contains_key(method_id) {
            self.routes.remove_method(method_id);
        }
        for key in endpoint.keys {
            self.routes.add_route(key, method_id);
        }
        self.methods.insert(
            method_id.to_string(),
            HandlerMethod {
                id: method_id.to_string(),
                middleware: endpoint.middleware.into(),
                params: endpoint.params.into(),
                handler,
            },
        );
        self
    }

    /// Finishes the group.
    #[must_use]
    pub fn build(self) -> HandlerGroup {
        HandlerGroup {
            name: self.name,
            options: self.options,
            routes: self.routes,
            methods: self.methods,
        }
    }
}

impl<T: Send + Sync + 'static> From<HandlerGroupBuilder<T>> for HandlerGroup {
    fn from(builder: HandlerGroupBuilder<T>) -> Self {
        builder.build()
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

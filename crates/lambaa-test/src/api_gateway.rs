//! API Gateway request fixtures.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use http::Method;
use serde_json::{json, Map, Value};

/// Builds an API Gateway REST (v1) request event.
///
/// Defaults to `GET /test` with no parameters and no body.
///
/// # Example
///
/// ```
/// use lambaa_test::ApiGatewayEventBuilder;
///
/// let event = ApiGatewayEventBuilder::post("/users/{id}")
///     .path("/users/42")
///     .path_param("id", "42")
///     .header("Content-Type", "application/json")
///     .json_body(&serde_json::json!({ "name": "Ada" }))
///     .build();
///
/// assert_eq!(event["httpMethod"], "POST");
/// assert_eq!(event["pathParameters"]["id"], "42");
/// ```
#[derive(Debug, Clone)]
pub struct ApiGatewayEventBuilder {
    method: Method,
    resource: String,
    path: Option<String>,
    headers: Map<String, Value>,
    query: Option<Map<String, Value>>,
    path_params: Option<Map<String, Value>>,
    body: Option<String>,
    base64: bool,
}

impl Default for ApiGatewayEventBuilder {
    fn default() -> Self {
        Self::new(Method::GET, "/test")
    }
}

impl ApiGatewayEventBuilder {
    /// A request for `method` on the resource template `resource`.
    #[must_use]
    pub fn new(method: Method, resource: impl Into<String>) -> Self {
        Self {
            method,
            resource: resource.into(),
            path: None,
            headers: Map::new(),
            query: None,
            path_params: None,
            body: None,
            base64: false,
        }
    }

    /// A `GET` request.
    #[must_use]
    pub fn get(resource: impl Into<String>) -> Self {
        Self::new(Method::GET, resource)
    }

    /// A `POST` request.
    #[must_use]
    pub fn post(resource: impl Into<String>) -> Self {
        Self::new(Method::POST, resource)
    }

    /// A proxy-integration request: resource `/{proxy+}` with the concrete path.
    #[must_use]
    pub fn proxy(method: Method, path: impl Into<String>) -> Self {
        Self::new(method, "/{proxy+}").path(path)
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the concrete request path. Defaults to the resource.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), Value::String(value.into()));
        self
    }

    /// Adds a query string parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(Map::new)
            .insert(name.into(), Value::String(value.into()));
        self
    }

    /// Adds a path parameter.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params
            .get_or_insert_with(Map::new)
            .insert(name.into(), Value::String(value.into()));
        self
    }

    /// Sets the raw body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the body to `value` serialized as JSON.
    #[must_use]
    pub fn json_body(self, value: &Value) -> Self {
        self.body(value.to_string())
    }

    /// Base64-encodes the body and sets `isBase64Encoded`.
    #[must_use]
    pub fn base64_encoded(mut self) -> Self {
        self.base64 = true;
        self
    }

    /// Builds the event.
    #[must_use]
    pub fn build(self) -> Value {
        let path = self.path.unwrap_or_else(|| self.resource.clone());
        let body = self.body.map(|body| {
            if self.base64 {
                STANDARD.encode(body)
            } else {
                body
            }
        });
        let method = self.method.as_str();

        json!({
            "resource": self.resource,
            "path": path,
            "httpMethod": method,
            "headers": self.headers,
            "multiValueHeaders": {},
            "queryStringParameters": self.query,
            "multiValueQueryStringParameters": null,
            "pathParameters": self.path_params,
            "stageVariables": null,
            "requestContext": {
                "resourceId": "kdxer6",
                "resourcePath": self.resource,
                "httpMethod": method,
                "extendedRequestId": "test",
                "requestTime": "09/Apr/2015:12:34:56 +0000",
                "path": path,
                "accountId": "123456789012",
                "stage": "test",
                "requestTimeEpoch": 1_428_582_896_000_u64,
                "requestId": "c6af9ac6-7b61-11e6-9a41-93e8deadbeef",
                "identity": {
                    "sourceIp": "127.0.0.1",
                    "userAgent": "lambaa-test",
                },
                "domainName": "test.execute-api.us-east-1.amazonaws.com",
                "apiId": "test",
                "authorizer": {},
                "protocol": "HTTP/1.1",
            },
            "body": body,
            "isBase64Encoded": self.base64,
        })
    }
}

/// A proxy-integration request event for `method` and `path`.
#[must_use]
pub fn proxy_event(method: Method, path: &str) -> Value {
    ApiGatewayEventBuilder::proxy(method, path).build()
}

//! Error types for Lambaa.
//!
//! Two coded error kinds are raised by the library itself:
//!
//! | Type | Raised when | Codes |
//! |---|---|---|
//! | [`RouterError`] | No handler group claims the event | `ROUTE_NOT_FOUND` |
//! | [`RequestError`] | A declared parameter cannot be extracted | `MISSING_*`, `INVALID_*` |
//!
//! Everything a handler or middleware raises is carried as
//! [`Error::Handler`]. All three travel through the pipeline as [`Error`], so
//! middleware can observe and translate any of them.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Machine-readable routing error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouterErrorCode {
    /// No handler group has a route for the event.
    RouteNotFound,
}

impl RouterErrorCode {
    /// Returns the wire identifier of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
        }
    }
}

impl fmt::Display for RouterErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when an event cannot be routed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RouterError {
    code: RouterErrorCode,
    message: String,
}

impl RouterError {
    /// Creates a routing error with an explicit code and message.
    #[must_use]
    pub fn new(code: RouterErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// No configured route for the event.
    #[must_use]
    pub fn route_not_found() -> Self {
        Self::new(
            RouterErrorCode::RouteNotFound,
            "No configured route for this event",
        )
    }

    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> RouterErrorCode {
        self.code
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Machine-readable parameter extraction error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestErrorCode {
    /// A path parameter was declared but not present.
    MissingPathParameter,
    /// A required query parameter was not present.
    MissingQueryParameter,
    /// A required body was not present.
    MissingRequestData,
    /// A required header was not present.
    MissingHeader,
    /// A raw value could not be converted to the declared type.
    InvalidCoercion,
    /// The body was present but could not be decoded.
    InvalidRequestBody,
}

impl RequestErrorCode {
    /// Returns the wire identifier of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingPathParameter => "MISSING_PATH_PARAMETER",
            Self::MissingQueryParameter => "MISSING_QUERY_PARAMETER",
            Self::MissingRequestData => "MISSING_REQUEST_DATA",
            Self::MissingHeader => "MISSING_HEADER",
            Self::InvalidCoercion => "INVALID_COERCION",
            Self::InvalidRequestBody => "INVALID_REQUEST_BODY",
        }
    }
}

impl fmt::Display for RequestErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a declared request parameter cannot be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    code: RequestErrorCode,
    message: String,
    parameter: Option<String>,
}

impl RequestError {
    /// Creates a request error with an explicit code and message.
    #[must_use]
    pub fn new(code: RequestErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            parameter: None,
        }
    }

    fn for_parameter(code: RequestErrorCode, name: &str, message: String) -> Self {
        Self {
            code,
            message,
            parameter: Some(name.to_string()),
        }
    }

    /// A declared path parameter is absent.
    #[must_use]
    pub fn missing_path_parameter(name: &str) -> Self {
        Self::for_parameter(
            RequestErrorCode::MissingPathParameter,
            name,
            format!("Missing path parameter '{name}'"),
        )
    }

    /// A required query parameter is absent.
    #[must_use]
    pub fn missing_query_parameter(name: &str) -> Self {
        Self::for_parameter(
            RequestErrorCode::MissingQueryParameter,
            name,
            format!("Missing query parameter '{name}'"),
        )
    }

    /// A required header is absent.
    #[must_use]
    pub fn missing_header(name: &str) -> Self {
        Self::for_parameter(
            RequestErrorCode::MissingHeader,
            name,
            format!("Missing header '{name}'"),
        )
    }

    /// A required body is absent.
    #[must_use]
    pub fn missing_request_body() -> Self {
        Self::new(RequestErrorCode::MissingRequestData, "Missing request body")
    }

    /// The body could not be decoded.
    #[must_use]
    pub fn invalid_request_body(details: impl fmt::Display) -> Self {
        Self::new(
            RequestErrorCode::InvalidRequestBody,
            format!("Invalid request body: {details}"),
        )
    }

    /// A raw value could not be converted to the expected type.
    #[must_use]
    pub fn invalid_coercion(name: &str, value: &str, expected: &str) -> Self {
        Self::for_parameter(
            RequestErrorCode::InvalidCoercion,
            name,
            format!("Parameter '{name}' value '{value}' is not a valid {expected}"),
        )
    }

    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> RequestErrorCode {
        self.code
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending parameter name, if the error concerns one.
    #[must_use]
    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }
}

/// Any failure surfaced by routing an event.
#[derive(Debug, Error)]
pub enum Error {
    /// The event could not be routed.
    #[error(transparent)]
    Routing(#[from] RouterError),

    /// A declared parameter could not be extracted.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// A handler or middleware failed.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

impl Error {
    /// Wraps an arbitrary error raised by user code.
    pub fn handler<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Handler(error.into())
    }

    /// Creates a handler error from a message.
    #[must_use]
    pub fn msg(message: impl fmt::Display + fmt::Debug + Send + Sync + 'static) -> Self {
        Self::Handler(anyhow::Error::msg(message))
    }

    /// Returns the routing error, if this is one.
    #[must_use]
    pub const fn as_router_error(&self) -> Option<&RouterError> {
        match self {
            Self::Routing(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the request error, if this is one.
    #[must_use]
    pub const fn as_request_error(&self) -> Option<&RequestError> {
        match self {
            Self::Request(err) => Some(err),
            _ => None,
        }
    }

    /// Returns a machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Routing(err) => err.code().as_str(),
            Self::Request(err) => err.code().as_str(),
            Self::Handler(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Routing(_) => StatusCode::NOT_FOUND,
            Self::Request(_) => StatusCode::BAD_REQUEST,
            Self::Handler(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Renders this error as an API Gateway proxy response.
    ///
    /// Handler error messages are replaced by a generic message unless
    /// `expose_internal` is set.
    #[must_use]
    pub fn to_api_gateway_response(&self, expose_internal: bool) -> Value {
        let message = match self {
            Self::Handler(_) if !expose_internal => "Internal server error".to_string(),
            other => other.to_string(),
        };
        let mut detail = json!({
            "code": self.code(),
            "message": message,
        });
        if let Some(parameter) = self.as_request_error().and_then(RequestError::parameter) {
            detail["parameter"] = Value::String(parameter.to_string());
        }
        json!({
            "statusCode": self.status_code().as_u16(),
            "headers": { "Content-Type": "application/json" },
            "body": json!({ "error": detail }).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_not_found() {
        let error = RouterError::route_not_found();
        assert_eq!(error.code(), RouterErrorCode::RouteNotFound);
        assert_eq!(error.code().as_str(), "ROUTE_NOT_FOUND");
        assert!(error.to_string().contains("No configured route"));
    }

    #[test]
    fn test_request_error_codes() {
        assert_eq!(
            RequestError::missing_path_parameter("id").code().as_str(),
            "MISSING_PATH_PARAMETER"
        );
        assert_eq!(
            RequestError::missing_query_parameter("page").code().as_str(),
            "MISSING_QUERY_PARAMETER"
        );
        assert_eq!(
            RequestError::missing_request_body().code().as_str(),
            "MISSING_REQUEST_DATA"
        );
        assert_eq!(
            RequestError::missing_header("x-api-key").code().as_str(),
            "MISSING_HEADER"
        );
    }

    #[test]
    fn test_request_error_names_parameter() {
        let error = RequestError::missing_query_parameter("test");
        assert_eq!(error.parameter(), Some("test"));
        assert!(error.message().contains("'test'"));
        assert_eq!(RequestError::missing_request_body().parameter(), None);
    }

    #[test]
    fn test_error_conversion_and_status() {
        let error: Error = RouterError::route_not_found().into();
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert!(error.as_router_error().is_some());

        let error: Error = RequestError::missing_header("auth").into();
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), "MISSING_HEADER");

        let error = Error::msg("boom");
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "boom");
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&RequestErrorCode::InvalidCoercion).unwrap();
        assert_eq!(json, "\"INVALID_COERCION\"");
    }

    #[test]
    fn test_api_gateway_response_hides_internal_errors() {
        let error = Error::msg("database password is hunter2");
        let response = error.to_api_gateway_response(false);
        assert_eq!(response["statusCode"], 500);
        let body = response["body"].as_str().unwrap();
        assert!(!body.contains("hunter2"));
        assert!(body.contains("INTERNAL_ERROR"));

        let exposed = error.to_api_gateway_response(true);
        assert!(exposed["body"].as_str().unwrap().contains("hunter2"));
    }

    #[test]
    fn test_api_gateway_response_for_request_error() {
        let error: Error = RequestError::missing_query_parameter("page").into();
        let response = error.to_api_gateway_response(false);
        assert_eq!(response["statusCode"], 400);
        let body: Value = serde_json::from_str(response["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["error"]["code"], "MISSING_QUERY_PARAMETER");
        assert_eq!(body["error"]["parameter"], "page");
    }
}

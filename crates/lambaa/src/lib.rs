//! # Lambaa
//!
//! **Event router and middleware pipeline for AWS Lambda handlers**
//!
//! One function can serve API Gateway requests, queue batches, stream
//! records, scheduled triggers and bus events. Lambaa classifies each inbound
//! event, finds the handler method registered for it, runs the middleware
//! chain around that method and extracts the method's declared parameters.
//!
//! ## Quick Start
//!
//! ```rust
//! use lambaa::prelude::*;
//! use serde_json::json;
//!
//! struct Users;
//!
//! let users = HandlerGroup::builder(Users)
//!     .base_path("/users")
//!     .endpoint(
//!         "getUser",
//!         Endpoint::get("/{id}").param(Param::path("id").number()),
//!         |_users, args| async move {
//!             let id: u64 = args.require(0)?;
//!             Ok(json!({ "statusCode": 200, "body": id.to_string() }))
//!         },
//!     );
//!
//! let router = Router::new()
//!     .register_middleware(ErrorResponseMiddleware::new())
//!     .register_handler_group(users);
//!
//! # tokio_test::block_on(async {
//! let event = json!({ "resource": "/{proxy+}", "path": "/users/42", "httpMethod": "GET" });
//! let response = router.route(event, LambdaContext::default()).await.unwrap();
//! assert_eq!(response["body"], "42");
//! # });
//! ```
//!
//! ## Architecture
//!
//! Middleware layers wrap the handler from the outside in:
//!
//! ```text
//! event → global → handler group → method → parameters → handler
//!                                                           ↓
//! result ← global ← handler group ← method ←───────────────┘
//! ```
//!
//! Global middleware sees every event, including those no group claims.

#![doc(html_root_url = "https://docs.rs/lambaa/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod group;
mod resolver;
mod router;

pub use group::{Endpoint, GroupOptions, HandlerGroup, HandlerGroupBuilder, HandlerMethod, MethodFn};
pub use resolver::{resolve, Destination};
pub use router::{Router, RouterConfig};

// Re-export core types
pub use lambaa_core as core;

// Re-export router types
pub use lambaa_router as routing;

// Re-export middleware types
pub use lambaa_middleware as middleware;

// Re-export extraction types
pub use lambaa_extract as extract;

// Re-export telemetry
pub use lambaa_telemetry as telemetry;

// Re-export configuration
pub use lambaa_config as config;

pub use lambaa_extract::{Args, Param};

/// Prelude module for convenient imports.
///
/// ```rust
/// use lambaa::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Endpoint, HandlerGroup, Router, RouterConfig};

    pub use lambaa_core::{Error, EventCategory, EventKind, LambdaContext, RequestError, Result, RouterError};

    pub use lambaa_extract::{Args, Param};

    pub use lambaa_middleware::stages::{ErrorLoggerMiddleware, ErrorResponseMiddleware};
    pub use lambaa_middleware::{from_fn, from_fn_named, BoxFuture, Middleware, MiddlewareContext, Next};

    pub use lambaa_router::{RouteKey, SourceKind};
}

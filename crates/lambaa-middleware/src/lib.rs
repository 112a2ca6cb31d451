//! # Lambaa Middleware
//!
//! Middleware pipeline executor for the Lambaa event router.
//!
//! A routed event passes through three middleware layers before it reaches
//! its handler, and the result passes back out through the same layers:
//!
//! ```text
//! event → global → handler group → method → handler
//!                                              ↓
//! result ← global ← handler group ← method ←──┘
//! ```
//!
//! Any middleware may short-circuit by returning without calling
//! [`Next::run`], or observe and convert an error raised further in.
//!
//! ## Example
//!
//! ```
//! use lambaa_core::LambdaContext;
//! use lambaa_middleware::{from_fn, MiddlewareContext, Pipeline};
//! use serde_json::{json, Value};
//!
//! # tokio_test::block_on(async {
//! let authorize = from_fn(|event: Value, context, next, _ctx| async move {
//!     if event["headers"]["authorization"].is_null() {
//!         return Ok(json!({ "statusCode": 401 }));
//!     }
//!     next.run(event, context).await
//! });
//!
//! let pipeline = Pipeline::builder().middleware(authorize).build();
//! let result = pipeline
//!     .invoke(json!({ "headers": {} }), LambdaContext::default(), MiddlewareContext::new(), |_, _| async {
//!         Ok(json!({ "statusCode": 200 }))
//!     })
//!     .await
//!     .unwrap();
//! assert_eq!(result["statusCode"], 401);
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/lambaa-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod context;
pub mod middleware;
pub mod pipeline;
pub mod stages;
pub mod types;

pub use context::MiddlewareContext;
pub use middleware::{
    from_fn, from_fn_named, BoxFuture, BoxedMiddleware, FnMiddleware, Middleware, Next,
};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use types::TerminalHandler;

//! Common types used throughout the middleware pipeline.

use crate::middleware::BoxFuture;
use lambaa_core::{LambdaContext, Result};
use serde_json::Value;

/// The innermost step of a chain: invoked once with the final event and
/// context when every middleware has passed control inward.
pub type TerminalHandler =
    Box<dyn FnOnce(Value, LambdaContext) -> BoxFuture<'static, Result<Value>> + Send>;

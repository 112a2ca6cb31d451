//! Invocation context.
//!
//! The [`LambdaContext`] carries the host runtime's per-invocation metadata
//! through the middleware pipeline and into handlers. Lambaa never inspects
//! it; it is forwarded untouched unless a middleware replaces it.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Per-invocation metadata supplied by the serverless host.
///
/// # Example
///
/// ```
/// use lambaa_core::LambdaContext;
///
/// let context = LambdaContext::new("req-1")
///     .with_function_name("orders-api")
///     .with_memory_limit_in_mb(256);
///
/// assert_eq!(context.request_id(), "req-1");
/// assert_eq!(context.function_name(), "orders-api");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LambdaContext {
    #[serde(rename = "awsRequestId")]
    request_id: String,
    function_name: String,
    function_version: String,
    invoked_function_arn: String,
    memory_limit_in_mb: u32,
    log_group_name: String,
    log_stream_name: String,
    /// Invocation deadline in milliseconds since the Unix epoch.
    deadline_ms: Option<u64>,
}

impl LambdaContext {
    /// Creates a context with the given request id and empty metadata.
    #[must_use]
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            ..Self::default()
        }
    }

    /// Returns the invocation's request id.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the function name.
    #[must_use]
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Returns the function version.
    #[must_use]
    pub fn function_version(&self) -> &str {
        &self.function_version
    }

    /// Returns the ARN used to invoke the function.
    #[must_use]
    pub fn invoked_function_arn(&self) -> &str {
        &self.invoked_function_arn
    }

    /// Returns the configured memory limit.
    #[must_use]
    pub const fn memory_limit_in_mb(&self) -> u32 {
        self.memory_limit_in_mb
    }

    /// Returns the log group name.
    #[must_use]
    pub fn log_group_name(&self) -> &str {
        &self.log_group_name
    }

    /// Returns the log stream name.
    #[must_use]
    pub fn log_stream_name(&self) -> &str {
        &self.log_stream_name
    }

    /// Returns the deadline in milliseconds since the Unix epoch, if known.
    #[must_use]
    pub const fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Sets the function name.
    #[must_use]
    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = name.into();
        self
    }

    /// Sets the function version.
    #[must_use]
    pub fn with_function_version(mut self, version: impl Into<String>) -> Self {
        self.function_version = version.into();
        self
    }

    /// Sets the invoked function ARN.
    #[must_use]
    pub fn with_invoked_function_arn(mut self, arn: impl Into<String>) -> Self {
        self.invoked_function_arn = arn.into();
        self
    }

    /// Sets the memory limit.
    #[must_use]
    pub const fn with_memory_limit_in_mb(mut self, memory: u32) -> Self {
        self.memory_limit_in_mb = memory;
        self
    }

    /// Sets log group and stream names.
    #[must_use]
    pub fn with_log_names(mut self, group: impl Into<String>, stream: impl Into<String>) -> Self {
        self.log_group_name = group.into();
        self.log_stream_name = stream.into();
        self
    }

    /// Sets the deadline in milliseconds since the Unix epoch.
    #[must_use]
    pub const fn with_deadline_ms(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }

    /// Time left before the deadline, or `None` if no deadline is known.
    ///
    /// Returns [`Duration::ZERO`] once the deadline has passed.
    #[must_use]
    pub fn remaining_time(&self) -> Option<Duration> {
        let deadline = Duration::from_millis(self.deadline_ms?);
        let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
        Some(deadline.saturating_sub(now))
    }
}

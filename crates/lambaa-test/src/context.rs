//! Invocation context fixture.

use lambaa_core::LambdaContext;

/// Request id carried by [`lambda_context`].
pub const TEST_REQUEST_ID: &str = "c6af9ac6-7b61-11e6-9a41-93e8deadbeef";

/// A realistic invocation context for a function named `test-function`.
///
/// The context has no deadline, so `remaining_time()` is `None`.
#[must_use]
pub fn lambda_context() -> LambdaContext {
    LambdaContext::new(TEST_REQUEST_ID)
        .with_function_name("test-function")
        .with_function_version("$LATEST")
        .with_invoked_function_arn("arn:aws:lambda:us-east-1:123456789012:function:test-function")
        .with_memory_limit_in_mb(128)
        .with_log_names(
            "/aws/lambda/test-function",
            "2024/01/01/[$LATEST]0123456789abcdef0123456789abcdef",
        )
}

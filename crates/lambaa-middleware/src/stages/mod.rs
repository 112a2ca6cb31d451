//! Built-in middleware stages.
//!
//! Neither stage is installed automatically; register them on a router or a
//! handler group where they are wanted.
//!
//! - [`error_response`] - Renders failures of API Gateway events as HTTP responses
//! - [`error_logger`] - Logs failures with their destination and re-raises them

pub mod error_logger;
pub mod error_response;

pub use error_logger::ErrorLoggerMiddleware;
pub use error_response::ErrorResponseMiddleware;

//! # Lambaa Test
//!
//! Fixtures for testing Lambaa routers without a Lambda runtime.
//!
//! Every factory returns the event as a `serde_json::Value` shaped like the
//! payload AWS delivers, so it can be passed straight to `Router::route`.
//!
//! ```
//! use lambaa_core::{classify, EventKind};
//! use lambaa_test::{lambda_context, sqs_event, ApiGatewayEventBuilder};
//!
//! let request = ApiGatewayEventBuilder::get("/ping").build();
//! assert_eq!(classify(&request).map(|c| c.kind()), Some(EventKind::ApiGateway));
//!
//! let batch = sqs_event(&["arn:aws:sqs:us-east-1:123456789012:orders"]);
//! assert_eq!(classify(&batch).map(|c| c.kind()), Some(EventKind::Sqs));
//!
//! let context = lambda_context();
//! assert_eq!(context.function_name(), "test-function");
//! ```

#![doc(html_root_url = "https://docs.rs/lambaa-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api_gateway;
mod context;
mod records;

pub use api_gateway::{proxy_event, ApiGatewayEventBuilder};
pub use context::{lambda_context, TEST_REQUEST_ID};
pub use records::{
    dynamodb_stream_event, event_bridge_event, kinesis_stream_event, s3_event, scheduled_event,
    sns_event, sqs_event, DYNAMODB_STREAM_LABEL,
};

//! Middleware used by the demo handler groups.

use lambaa::prelude::*;
use lambaa::middleware::FnMiddleware;
use serde_json::{json, Value};

/// Turns any failure into an empty 500 response.
pub fn api_error_handler() -> impl Middleware {
    FnMiddleware::new("api_error_handler", |event: Value, context, next: Next, ctx| async move {
        match next.run(event, context).await {
            Ok(response) => Ok(response),
            Err(err) => {
                tracing::error!(
                    method = ctx.destination_method().unwrap_or("-"),
                    error = %err,
                    "an unexpected error occurred"
                );
                Ok(json!({ "statusCode": 500, "body": "" }))
            }
        }
    })
}

/// Rejects requests without an `Authorization` header.
pub fn authorization() -> impl Middleware {
    FnMiddleware::new("authorization", |event: Value, context, next: Next, _ctx| async move {
        if is_authorized(&event) {
            next.run(event, context).await
        } else {
            Ok(json!({ "statusCode": 401, "body": "" }))
        }
    })
}

fn is_authorized(event: &Value) -> bool {
    event["headers"]
        .as_object()
        .is_some_and(|headers| {
            headers
                .iter()
                .any(|(name, value)| name.eq_ignore_ascii_case("authorization") && value.is_string())
        })
}

/// Logs the verb and path of each request.
pub fn log_request() -> impl Middleware {
    FnMiddleware::new("log_request", |event: Value, context, next: Next, _ctx| {
        tracing::info!(
            method = event["httpMethod"].as_str().unwrap_or("-"),
            path = event["path"].as_str().unwrap_or("-"),
            "request received"
        );
        next.run(event, context)
    })
}

/// Logs the size of each queue batch.
pub fn record_queue_event() -> impl Middleware {
    FnMiddleware::new("record_queue_event", |event: Value, context, next: Next, _ctx| {
        let records = event["Records"].as_array().map_or(0, Vec::len);
        tracing::info!(records, "received queue event");
        next.run(event, context)
    })
}

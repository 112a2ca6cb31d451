//! Handler groups of the demo function.

use crate::middleware::{api_error_handler, authorization, log_request, record_queue_event};
use lambaa::prelude::*;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Queue used when `EXAMPLE_QUEUE_ARN` is not set.
pub const DEFAULT_QUEUE_ARN: &str = "arn:aws:sqs:us-east-1:123456789012:example-queue";

/// Answers `GET /ping`.
pub struct PingController;

impl PingController {
    pub fn group() -> HandlerGroup {
        HandlerGroup::builder(Self)
            .middleware(api_error_handler())
            .endpoint(
                "ping",
                Endpoint::get("/ping").with(log_request()),
                |_, _| async { Ok(json!({ "statusCode": 200, "body": "pong" })) },
            )
            .build()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct User {
    user_id: u64,
    user_name: String,
}

/// User listing behind the authorization middleware.
pub struct UsersController {
    users: Vec<User>,
}

impl UsersController {
    pub fn group() -> HandlerGroup {
        let controller = Self {
            users: vec![User {
                user_id: 1,
                user_name: "testuser".to_string(),
            }],
        };

        HandlerGroup::builder(controller)
            .middleware(api_error_handler())
            .middleware(authorization())
            .base_path("/users")
            .endpoint("getUsers", Endpoint::get("/"), |users: Arc<Self>, _| async move {
                ok(&users.users)
            })
            .endpoint(
                "getUser",
                Endpoint::get("/{userId}").param(Param::path("userId").number()),
                |users: Arc<Self>, args| async move {
                    let user_id: u64 = args.require(0)?;
                    match users.users.iter().find(|user| user.user_id == user_id) {
                        Some(user) => ok(user),
                        None => Ok(json!({ "statusCode": 404, "body": "" })),
                    }
                },
            )
            .build()
    }
}

fn ok(body: &impl Serialize) -> Result<Value> {
    let body = serde_json::to_string(body).map_err(Error::handler)?;
    Ok(json!({ "statusCode": 200, "body": body }))
}

/// Consumes the example queue.
pub struct QueueController;

impl QueueController {
    pub fn group(queue_arn: &str) -> HandlerGroup {
        HandlerGroup::builder(Self)
            .middleware(record_queue_event())
            .endpoint("receiveQueueEvent", Endpoint::sqs(queue_arn), |_, args| async move {
                let records = args.event()["Records"].as_array().map_or(0, Vec::len);
                tracing::info!(records, "processed queue event");
                Ok(Value::Null)
            })
            .build()
    }
}

/// The demo router.
pub fn router(config: RouterConfig, queue_arn: &str) -> Router {
    Router::with_config(config)
        .register_middleware(ErrorLoggerMiddleware::new())
        .register_handler_groups([
            PingController::group(),
            UsersController::group(),
            QueueController::group(queue_arn),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use lambaa_test::{lambda_context, proxy_event, sqs_event, ApiGatewayEventBuilder};

    fn demo() -> Router {
        router(RouterConfig { debug: false }, DEFAULT_QUEUE_ARN)
    }

    #[tokio::test]
    async fn test_ping() {
        let response = demo()
            .route(ApiGatewayEventBuilder::get("/ping").build(), lambda_context())
            .await
            .unwrap();
        assert_eq!(response["body"], "pong");
    }

    #[tokio::test]
    async fn test_users_require_authorization() {
        let response = demo()
            .route(proxy_event(Method::GET, "/users"), lambda_context())
            .await
            .unwrap();
        assert_eq!(response["statusCode"], 401);
    }

    #[tokio::test]
    async fn test_get_user() {
        let event = ApiGatewayEventBuilder::proxy(Method::GET, "/users/1")
            .header("Authorization", "Bearer demo")
            .build();
        let response = demo().route(event, lambda_context()).await.unwrap();
        assert_eq!(response["statusCode"], 200);
        assert_eq!(response["body"], r#"{"userId":1,"userName":"testuser"}"#);
    }

    #[tokio::test]
    async fn test_invalid_user_id_is_server_error() {
        let event = ApiGatewayEventBuilder::proxy(Method::GET, "/users/abc")
            .header("Authorization", "Bearer demo")
            .build();
        let response = demo().route(event, lambda_context()).await.unwrap();
        assert_eq!(response["statusCode"], 500);
    }

    #[tokio::test]
    async fn test_queue() {
        let response = demo()
            .route(sqs_event(&[DEFAULT_QUEUE_ARN]), lambda_context())
            .await
            .unwrap();
        assert!(response.is_null());
    }
}

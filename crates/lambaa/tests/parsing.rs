//! Parameter extraction through the router.

use lambaa::prelude::*;
use lambaa_core::RequestErrorCode;
use lambaa_test::{lambda_context, proxy_event, sqs_event, ApiGatewayEventBuilder};
use serde_json::{json, Value};

/// A router with one method that echoes its parameter slots.
fn echo(endpoint: Endpoint) -> Router {
    let group = HandlerGroup::builder(()).endpoint("echo", endpoint, |_, args| async move {
        Ok(Value::Array(
            args.params()
                .iter()
                .map(|slot| slot.clone().unwrap_or(json!("<absent>")))
                .collect(),
        ))
    });
    Router::with_config(RouterConfig { debug: false }).register_handler_group(group)
}

async fn request_error(router: &Router, event: Value) -> RequestErrorCode {
    let err = router.route(event, lambda_context()).await.unwrap_err();
    err.as_request_error()
        .map(RequestError::code)
        .unwrap_or_else(|| panic!("expected a request error, got {err}"))
}

#[tokio::test]
async fn test_missing_required_parameters() {
    let cases = [
        (Param::path("id"), RequestErrorCode::MissingPathParameter),
        (Param::query("page"), RequestErrorCode::MissingQueryParameter),
        (Param::header("Authorization"), RequestErrorCode::MissingHeader),
        (Param::body(), RequestErrorCode::MissingRequestData),
    ];

    for (param, expected) in cases {
        let router = echo(Endpoint::get("/items").param(param));
        let code = request_error(&router, ApiGatewayEventBuilder::get("/items").build()).await;
        assert_eq!(code, expected);
    }
}

#[tokio::test]
async fn test_missing_error_names_parameter() {
    let router = echo(Endpoint::get("/items").param(Param::query("page")));
    let err = router
        .route(ApiGatewayEventBuilder::get("/items").build(), lambda_context())
        .await
        .unwrap_err();
    assert_eq!(err.as_request_error().unwrap().parameter(), Some("page"));
}

#[tokio::test]
async fn test_optional_parameters_absent() {
    let router = echo(
        Endpoint::get("/items")
            .param(Param::query("page").optional())
            .param(Param::header("X-Trace").optional())
            .param(Param::body().optional()),
    );

    let result = router
        .route(ApiGatewayEventBuilder::get("/items").build(), lambda_context())
        .await
        .unwrap();
    assert_eq!(result, json!(["<absent>", "<absent>", "<absent>"]));
}

#[tokio::test]
async fn test_empty_string_counts_as_absent() {
    let router = echo(Endpoint::get("/items").param(Param::query("page")));
    let event = ApiGatewayEventBuilder::get("/items").query("page", "").build();
    assert_eq!(
        request_error(&router, event).await,
        RequestErrorCode::MissingQueryParameter
    );
}

#[tokio::test]
async fn test_numeric_coercion() {
    let router = echo(
        Endpoint::get("/items/{id}")
            .param(Param::path("id").number())
            .param(Param::query("limit").number())
            .param(Param::header("X-Retry").number()),
    );

    let event = ApiGatewayEventBuilder::get("/items/{id}")
        .path_param("id", "5")
        .query("limit", "5")
        .header("X-Retry", "5")
        .build();
    let result = router.route(event, lambda_context()).await.unwrap();
    assert_eq!(result, json!([5, 5, 5]));

    let invalid = ApiGatewayEventBuilder::get("/items/{id}")
        .path_param("id", "invalid")
        .query("limit", "5")
        .header("X-Retry", "5")
        .build();
    assert_eq!(
        request_error(&router, invalid).await,
        RequestErrorCode::InvalidCoercion
    );
}

#[tokio::test]
async fn test_boolean_and_string_coercion() {
    let router = echo(
        Endpoint::get("/search")
            .param(Param::query("exact").boolean())
            .param(Param::query("fuzzy").boolean())
            .param(Param::query("q").string()),
    );

    let event = ApiGatewayEventBuilder::get("/search")
        .query("exact", "TRUE")
        .query("fuzzy", "yes")
        .query("q", "42")
        .build();
    let result = router.route(event, lambda_context()).await.unwrap();
    assert_eq!(result, json!([true, false, "42"]));
}

#[tokio::test]
async fn test_custom_coercion_and_decoder() {
    let router = echo(
        Endpoint::get("/tags")
            .param(Param::query("tags").coerce(|raw| {
                Ok(Value::Array(raw.split(',').map(|tag| json!(tag)).collect()))
            }))
            .param(Param::decoded(|event| event["requestContext"]["stage"].clone())),
    );

    let event = ApiGatewayEventBuilder::get("/tags").query("tags", "a,b").build();
    let result = router.route(event, lambda_context()).await.unwrap();
    assert_eq!(result, json!([["a", "b"], "test"]));
}

#[tokio::test]
async fn test_json_body() {
    let router = echo(Endpoint::post("/users").param(Param::body()));

    let event = ApiGatewayEventBuilder::post("/users")
        .json_body(&json!({ "name": "Ada" }))
        .build();
    let result = router.route(event, lambda_context()).await.unwrap();
    assert_eq!(result, json!([{ "name": "Ada" }]));

    let encoded = ApiGatewayEventBuilder::post("/users")
        .json_body(&json!({ "name": "Grace" }))
        .base64_encoded()
        .build();
    let result = router.route(encoded, lambda_context()).await.unwrap();
    assert_eq!(result[0]["name"], "Grace");

    let malformed = ApiGatewayEventBuilder::post("/users").body("{not json").build();
    assert_eq!(
        request_error(&router, malformed).await,
        RequestErrorCode::InvalidRequestBody
    );
}

#[tokio::test]
async fn test_body_checked_before_query() {
    let router = echo(
        Endpoint::post("/users")
            .param(Param::query("dryRun"))
            .param(Param::body()),
    );
    let event = ApiGatewayEventBuilder::post("/users").build();
    assert_eq!(
        request_error(&router, event).await,
        RequestErrorCode::MissingRequestData
    );
}

#[tokio::test]
async fn test_proxy_path_parameters_are_extracted() {
    let router = echo(Endpoint::get("/orders/{orderId}").param(Param::path("orderId").number()));
    let result = router
        .route(proxy_event(http::Method::GET, "/orders/31"), lambda_context())
        .await
        .unwrap();
    assert_eq!(result, json!([31]));
}

#[tokio::test]
async fn test_rules_ignored_for_other_events() {
    let group = HandlerGroup::builder(()).endpoint(
        "onMessage",
        Endpoint::sqs("arn:q").param(Param::query("page")),
        |_, args| async move { Ok(json!(args.params().len())) },
    );
    let router = Router::with_config(RouterConfig { debug: false }).register_handler_group(group);

    let result = router.route(sqs_event(&["arn:q"]), lambda_context()).await.unwrap();
    assert_eq!(result, json!(0));
}

#[tokio::test]
async fn test_handler_receives_event_and_context() {
    let group = HandlerGroup::builder(()).endpoint("ctx", Endpoint::get("/ctx"), |_, args| async move {
        Ok(json!({
            "path": args.event()["path"],
            "requestId": args.context().request_id(),
            "slots": args.len(),
        }))
    });
    let router = Router::with_config(RouterConfig { debug: false }).register_handler_group(group);

    let result = router
        .route(ApiGatewayEventBuilder::get("/ctx").build(), lambda_context())
        .await
        .unwrap();
    assert_eq!(result["path"], "/ctx");
    assert_eq!(result["requestId"], lambaa_test::TEST_REQUEST_ID);
    assert_eq!(result["slots"], 2);
}

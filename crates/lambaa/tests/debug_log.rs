//! The debug resolution line.

use lambaa::{Endpoint, HandlerGroup, Router, RouterConfig};
use lambaa_test::{lambda_context, sqs_event, ApiGatewayEventBuilder};
use serde_json::Value;
use std::io;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

struct UsersController;
struct QueueController;

fn router(debug: bool) -> Router {
    let users = HandlerGroup::builder(UsersController)
        .endpoint("getUsers", Endpoint::get("/users"), |_, _| async { Ok(Value::Null) });
    let queue = HandlerGroup::builder(QueueController)
        .endpoint("onMessage", Endpoint::sqs("arn:aws:sqs:us-east-2:1:jobs"), |_, _| async {
            Ok(Value::Null)
        });
    Router::with_config(RouterConfig { debug })
        .register_handler_group(users)
        .register_handler_group(queue)
}

async fn route_captured(router: &Router, event: Value) -> String {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    router.route(event, lambda_context()).await.unwrap();
    captured.text()
}

#[tokio::test]
async fn test_debug_line_names_destination() {
    let output = route_captured(&router(true), ApiGatewayEventBuilder::get("/users").build()).await;
    assert!(
        output.contains("routing GET /users request to UsersController.getUsers"),
        "{output}"
    );

    let output = route_captured(&router(true), sqs_event(&["arn:aws:sqs:us-east-2:1:jobs"])).await;
    assert!(
        output.contains("routing SQS event to QueueController.onMessage"),
        "{output}"
    );
}

#[tokio::test]
async fn test_debug_line_runs_inside_route_span() {
    let output = route_captured(&router(true), ApiGatewayEventBuilder::get("/users").build()).await;
    assert!(output.contains("lambaa.route"), "{output}");
    assert!(output.contains(lambaa_test::TEST_REQUEST_ID), "{output}");
}

#[tokio::test]
async fn test_no_debug_line_when_disabled() {
    let output = route_captured(&router(false), ApiGatewayEventBuilder::get("/users").build()).await;
    assert!(!output.contains("routing"), "{output}");
}

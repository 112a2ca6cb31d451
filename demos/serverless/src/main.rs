//! Lambaa demo function.
//!
//! Routes a handful of sample events, or the events in a JSON file given as
//! the first argument (one event object or an array of them), through the
//! demo router and prints each result.
//!
//! ```text
//! DEBUG=true cargo run -p lambaa-demo-serverless
//! cargo run -p lambaa-demo-serverless -- events.json
//! ```

mod controllers;
mod middleware;

use anyhow::Context as _;
use http::Method;
use lambaa::config::ConfigLoader;
use lambaa::telemetry::{describe_metrics, init_logging, LogConfig};
use lambaa::RouterConfig;
use lambaa_test::{lambda_context, sqs_event, ApiGatewayEventBuilder};
use serde_json::Value;
use std::{env, fs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::new()
        .with_optional_file("lambaa.toml")?
        .with_dotenv()?
        .with_env_prefix("LAMBAA")
        .load()?;
    init_logging(&LogConfig::from(&config.logging))?;
    describe_metrics();

    let queue_arn =
        env::var("EXAMPLE_QUEUE_ARN").unwrap_or_else(|_| controllers::DEFAULT_QUEUE_ARN.to_string());
    let handler = controllers::router(RouterConfig::from(&config), &queue_arn).into_handler();

    let events = match env::args().nth(1) {
        Some(path) => read_events(&path)?,
        None => sample_events(&queue_arn),
    };

    for event in events {
        match handler(event, lambda_context()).await {
            Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            Err(err) => tracing::error!(code = err.code(), error = %err, "invocation failed"),
        }
    }

    Ok(())
}

fn read_events(path: &str) -> anyhow::Result<Vec<Value>> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let parsed: Value =
        serde_json::from_str(&content).with_context(|| format!("parsing {path}"))?;
    Ok(match parsed {
        Value::Array(events) => events,
        event => vec![event],
    })
}

fn sample_events(queue_arn: &str) -> Vec<Value> {
    vec![
        ApiGatewayEventBuilder::get("/ping").build(),
        ApiGatewayEventBuilder::get("/users")
            .header("Authorization", "Bearer demo")
            .build(),
        ApiGatewayEventBuilder::proxy(Method::GET, "/users/1")
            .header("Authorization", "Bearer demo")
            .build(),
        ApiGatewayEventBuilder::get("/users").build(),
        sqs_event(&[queue_arn]),
        ApiGatewayEventBuilder::get("/missing").build(),
    ]
}

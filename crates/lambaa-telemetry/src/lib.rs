//! Observability for Lambaa.
//!
//! - **Logging**: [`init_logging`] installs a `tracing-subscriber` registry
//!   with an `EnvFilter` and JSON or pretty output.
//! - **Metrics**: the router records `metrics` counters and histograms via
//!   [`record_route`]; the host decides which recorder (if any) to install.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `lambaa_events_total` | Counter | `kind`, `outcome` | Events passed to the router |
//! | `lambaa_route_duration_seconds` | Histogram | `kind` | Routing latency |
//!
//! `kind` is the event category (`api_gateway`, `sqs`, ..., or `unknown`);
//! `outcome` is one of `handled`, `failed`, `unroutable`.

#![doc(html_root_url = "https://docs.rs/lambaa-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;
pub mod metrics;

pub use self::error::TelemetryError;
pub use self::logging::{create_env_filter, init_logging, route_span, LogConfig, ROUTE_SPAN};
pub use self::metrics::{describe_metrics, record_route, RouteOutcome};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

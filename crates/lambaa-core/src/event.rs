//! Event classification.
//!
//! Inbound events arrive as untyped JSON. [`classify`] runs a fixed sequence of
//! structural probes over the payload and returns the [`EventCategory`] of the
//! first probe that claims it. Probe order matters: a scheduled event also
//! carries `source` and `detail-type`, and a proxy event also carries
//! `resource` and `httpMethod`, so the more specific shapes are tested first.
//!
//! # Example
//!
//! ```
//! use lambaa_core::{classify, EventKind};
//! use serde_json::json;
//!
//! let event = json!({
//!     "Records": [{ "eventSource": "aws:sqs", "eventSourceARN": "arn:aws:sqs:eu-west-1:1:orders" }]
//! });
//!
//! let category = classify(&event).unwrap();
//! assert_eq!(category.kind(), EventKind::Sqs);
//! ```

use serde_json::Value;
use std::fmt;

/// `eventSource` tag carried by SQS records.
pub const SQS_EVENT_SOURCE: &str = "aws:sqs";
/// `EventSource` tag carried by SNS records.
pub const SNS_EVENT_SOURCE: &str = "aws:sns";
/// `eventSource` tag carried by DynamoDB stream records.
pub const DYNAMODB_EVENT_SOURCE: &str = "aws:dynamodb";
/// `eventSource` tag carried by Kinesis stream records.
pub const KINESIS_EVENT_SOURCE: &str = "aws:kinesis";
/// `eventSource` tag carried by S3 notification records.
pub const S3_EVENT_SOURCE: &str = "aws:s3";
/// `detail-type` value of scheduled events, compared case-insensitively.
pub const SCHEDULED_DETAIL_TYPE: &str = "scheduled event";

/// Greedy proxy placeholders recognised in a proxy event's `resource`.
const PROXY_MARKERS: [&str; 2] = ["{proxy+}", "{proxy*}"];

/// Marker separating a DynamoDB table ARN from its stream suffix.
const STREAM_MARKER: &str = "/stream/";

/// The kind of an event, without its routing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// API Gateway proxy integration (greedy `{proxy+}` resource).
    ApiGatewayProxy,
    /// API Gateway resource integration.
    ApiGateway,
    /// SQS batch.
    Sqs,
    /// SNS notification batch.
    Sns,
    /// Scheduled (cron / rate) event.
    Scheduled,
    /// DynamoDB stream batch.
    DynamoDbStream,
    /// Kinesis stream batch.
    KinesisStream,
    /// EventBridge event.
    EventBridge,
    /// S3 notification batch.
    S3,
}

impl EventKind {
    /// Stable lowercase name, used for log fields and metric labels.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ApiGatewayProxy => "api_gateway_proxy",
            Self::ApiGateway => "api_gateway",
            Self::Sqs => "sqs",
            Self::Sns => "sns",
            Self::Scheduled => "scheduled",
            Self::DynamoDbStream => "dynamodb_stream",
            Self::KinesisStream => "kinesis_stream",
            Self::EventBridge => "event_bridge",
            Self::S3 => "s3",
        }
    }

    /// Returns `true` for the two API Gateway kinds.
    #[must_use]
    pub const fn is_http(self) -> bool {
        matches!(self, Self::ApiGatewayProxy | Self::ApiGateway)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified event together with the data needed to route it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventCategory {
    /// Proxy integration: routed by matching the concrete `path`.
    ApiGatewayProxy {
        /// HTTP verb as sent by API Gateway.
        method: String,
        /// Concrete request path.
        path: String,
    },
    /// Resource integration: routed by exact `resource` template.
    ApiGateway {
        /// HTTP verb as sent by API Gateway.
        method: String,
        /// Resource template, e.g. `/users/{id}`.
        resource: String,
    },
    /// SQS batch, routed by any record's queue ARN.
    Sqs {
        /// `eventSourceARN` of each record, in record order.
        source_arns: Vec<String>,
    },
    /// SNS batch, routed by any record's topic ARN.
    Sns {
        /// `Sns.TopicArn` of each record, in record order.
        topic_arns: Vec<String>,
    },
    /// Scheduled event, routed by any rule ARN in `resources`.
    Scheduled {
        /// Rule ARNs.
        resources: Vec<String>,
    },
    /// DynamoDB stream batch, routed by table ARN (stream suffix removed).
    DynamoDbStream {
        /// Table ARN of each record, in record order.
        table_arns: Vec<String>,
    },
    /// Kinesis stream batch, routed by stream ARN.
    KinesisStream {
        /// `eventSourceARN` of each record, in record order.
        source_arns: Vec<String>,
    },
    /// EventBridge event, routed by `(detail-type, source)`.
    EventBridge {
        /// The `detail-type` field.
        detail_type: String,
        /// The `source` field.
        source: String,
    },
    /// S3 notification batch, routed by bucket ARN.
    S3 {
        /// `s3.bucket.arn` of each record, in record order.
        bucket_arns: Vec<String>,
    },
}

impl EventCategory {
    /// Returns the kind of this category.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::ApiGatewayProxy { .. } => EventKind::ApiGatewayProxy,
            Self::ApiGateway { .. } => EventKind::ApiGateway,
            Self::Sqs { .. } => EventKind::Sqs,
            Self::Sns { .. } => EventKind::Sns,
            Self::Scheduled { .. } => EventKind::Scheduled,
            Self::DynamoDbStream { .. } => EventKind::DynamoDbStream,
            Self::KinesisStream { .. } => EventKind::KinesisStream,
            Self::EventBridge { .. } => EventKind::EventBridge,
            Self::S3 { .. } => EventKind::S3,
        }
    }

    /// Returns `true` if this is an API Gateway event.
    #[must_use]
    pub const fn is_http(&self) -> bool {
        self.kind().is_http()
    }

    /// Short human-readable description used in diagnostics,
    /// e.g. `GET /users request` or `SQS event`.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::ApiGatewayProxy { method, path } => format!("{method} {path} request"),
            Self::ApiGateway { method, resource } => format!("{method} {resource} request"),
            Self::Sqs { .. } => "SQS event".to_string(),
            Self::Sns { .. } => "SNS event".to_string(),
            Self::Scheduled { .. } => "Schedule event".to_string(),
            Self::DynamoDbStream { .. } => "DynamoDB stream event".to_string(),
            Self::KinesisStream { .. } => "Kinesis stream event".to_string(),
            Self::EventBridge {
                detail_type,
                source,
            } => format!("EventBridge {source} {detail_type:?} event"),
            Self::S3 { .. } => "S3 event".to_string(),
        }
    }
}

/// A structural probe: returns the category if the event has its shape.
pub type Probe = fn(&Value) -> Option<EventCategory>;

/// Probes in the order [`classify`] evaluates them.
pub const PROBE_ORDER: [(EventKind, Probe); 9] = [
    (EventKind::ApiGatewayProxy, probe_api_gateway_proxy),
    (EventKind::ApiGateway, probe_api_gateway),
    (EventKind::Sqs, probe_sqs),
    (EventKind::Sns, probe_sns),
    (EventKind::Scheduled, probe_scheduled),
    (EventKind::DynamoDbStream, probe_dynamodb_stream),
    (EventKind::KinesisStream, probe_kinesis_stream),
    (EventKind::EventBridge, probe_event_bridge),
    (EventKind::S3, probe_s3),
];

/// Classifies an event. Returns `None` if no probe claims it.
///
/// Malformed payloads never panic; a probe that finds an unexpected shape
/// simply declines the event.
#[must_use]
pub fn classify(event: &Value) -> Option<EventCategory> {
    PROBE_ORDER.iter().find_map(|(_, probe)| probe(event))
}

/// Returns `true` if the event is an API Gateway event of either kind.
#[must_use]
pub fn is_api_gateway_event(event: &Value) -> bool {
    probe_api_gateway_proxy(event).is_some() || probe_api_gateway(event).is_some()
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn records(event: &Value) -> Option<&[Value]> {
    event.get("Records").and_then(Value::as_array).map(Vec::as_slice)
}

/// Returns the records if at least one carries `tag` under `field`.
fn tagged_records<'a>(event: &'a Value, field: &str, tag: &str) -> Option<&'a [Value]> {
    let records = records(event)?;
    records
        .iter()
        .any(|record| str_field(record, field) == Some(tag))
        .then_some(records)
}

fn collect_strings<'a>(
    records: &'a [Value],
    select: impl Fn(&'a Value) -> Option<&'a str>,
) -> Vec<String> {
    records
        .iter()
        .filter_map(select)
        .map(ToString::to_string)
        .collect()
}

/// Proxy integration: `resource` contains a greedy proxy placeholder.
pub fn probe_api_gateway_proxy(event: &Value) -> Option<EventCategory> {
    let resource = str_field(event, "resource")?;
    if !PROXY_MARKERS.iter().any(|marker| resource.contains(marker)) {
        return None;
    }
    Some(EventCategory::ApiGatewayProxy {
        method: str_field(event, "httpMethod").unwrap_or_default().to_string(),
        path: str_field(event, "path").unwrap_or("/").to_string(),
    })
}

/// Resource integration: both `resource` and `httpMethod` are present.
pub fn probe_api_gateway(event: &Value) -> Option<EventCategory> {
    let resource = str_field(event, "resource")?;
    let method = str_field(event, "httpMethod")?;
    Some(EventCategory::ApiGateway {
        method: method.to_string(),
        resource: resource.to_string(),
    })
}

/// SQS: some record has `eventSource == "aws:sqs"`.
pub fn probe_sqs(event: &Value) -> Option<EventCategory> {
    let records = tagged_records(event, "eventSource", SQS_EVENT_SOURCE)?;
    Some(EventCategory::Sqs {
        source_arns: collect_strings(records, |r| str_field(r, "eventSourceARN")),
    })
}

/// SNS: some record has `EventSource == "aws:sns"`.
pub fn probe_sns(event: &Value) -> Option<EventCategory> {
    let records = tagged_records(event, "EventSource", SNS_EVENT_SOURCE)?;
    Some(EventCategory::Sns {
        topic_arns: collect_strings(records, |r| {
            r.get("Sns").and_then(|sns| str_field(sns, "TopicArn"))
        }),
    })
}

/// Scheduled: `detail-type` equals "scheduled event", ignoring case.
pub fn probe_scheduled(event: &Value) -> Option<EventCategory> {
    let detail_type = str_field(event, "detail-type")?;
    if !detail_type.eq_ignore_ascii_case(SCHEDULED_DETAIL_TYPE) {
        return None;
    }
    let resources = event
        .get("resources")
        .and_then(Value::as_array)
        .map(|resources| collect_strings(resources, Value::as_str))
        .unwrap_or_default();
    Some(EventCategory::Scheduled { resources })
}

/// DynamoDB stream: some record has `eventSource == "aws:dynamodb"`.
pub fn probe_dynamodb_stream(event: &Value) -> Option<EventCategory> {
    let records = tagged_records(event, "eventSource", DYNAMODB_EVENT_SOURCE)?;
    Some(EventCategory::DynamoDbStream {
        table_arns: collect_strings(records, |r| {
            str_field(r, "eventSourceARN").map(table_arn)
        }),
    })
}

/// Kinesis stream: some record has `eventSource == "aws:kinesis"`.
pub fn probe_kinesis_stream(event: &Value) -> Option<EventCategory> {
    let records = tagged_records(event, "eventSource", KINESIS_EVENT_SOURCE)?;
    Some(EventCategory::KinesisStream {
        source_arns: collect_strings(records, |r| str_field(r, "eventSourceARN")),
    })
}

/// EventBridge: both `detail-type` and `source` are strings.
pub fn probe_event_bridge(event: &Value) -> Option<EventCategory> {
    let detail_type = str_field(event, "detail-type")?;
    let source = str_field(event, "source")?;
    Some(EventCategory::EventBridge {
        detail_type: detail_type.to_string(),
        source: source.to_string(),
    })
}

/// S3: some record has `eventSource == "aws:s3"`.
pub fn probe_s3(event: &Value) -> Option<EventCategory> {
    let records = tagged_records(event, "eventSource", S3_EVENT_SOURCE)?;
    Some(EventCategory::S3 {
        bucket_arns: collect_strings(records, |r| {
            r.pointer("/s3/bucket/arn").and_then(Value::as_str)
        }),
    })
}

/// Strips the `/stream/<label>` suffix from a DynamoDB stream ARN.
///
/// ```
/// use lambaa_core::event::table_arn;
///
/// assert_eq!(
///     table_arn("arn:aws:dynamodb:us-east-1:1:table/Orders/stream/2024-01-01T00:00:00.000"),
///     "arn:aws:dynamodb:us-east-1:1:table/Orders",
/// );
/// ```
#[must_use]
pub fn table_arn(stream_arn: &str) -> &str {
    stream_arn
        .find(STREAM_MARKER)
        .map_or(stream_arn, |idx| &stream_arn[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_proxy_event() {
        let event = json!({
            "resource": "/{proxy+}",
            "path": "/test/10",
            "httpMethod": "PUT",
        });
        assert_eq!(
            classify(&event),
            Some(EventCategory::ApiGatewayProxy {
                method: "PUT".to_string(),
                path: "/test/10".to_string(),
            })
        );
    }

    #[test]
    fn test_proxy_star_marker() {
        let event = json!({ "resource": "/api/{proxy*}", "path": "/api/x", "httpMethod": "GET" });
        assert_eq!(classify(&event).map(|c| c.kind()), Some(EventKind::ApiGatewayProxy));
    }

    #[test]
    fn test_resource_event() {
        let event = json!({ "resource": "/users/{id}", "httpMethod": "GET", "path": "/users/4" });
        assert_eq!(
            classify(&event),
            Some(EventCategory::ApiGateway {
                method: "GET".to_string(),
                resource: "/users/{id}".to_string(),
            })
        );
    }

    #[test]
    fn test_resource_without_method_is_unclassified() {
        let event = json!({ "resource": "/users" });
        assert_eq!(classify(&event), None);
    }

    #[test]
    fn test_sqs_collects_all_arns() {
        let event = json!({
            "Records": [
                { "eventSource": "aws:sqs", "eventSourceARN": "arn:a" },
                { "eventSource": "aws:sqs", "eventSourceARN": "arn:b" },
            ]
        });
        assert_eq!(
            classify(&event),
            Some(EventCategory::Sqs {
                source_arns: vec!["arn:a".to_string(), "arn:b".to_string()],
            })
        );
    }

    #[test]
    fn test_sns_topic_arns() {
        let event = json!({
            "Records": [{ "EventSource": "aws:sns", "Sns": { "TopicArn": "arn:topic" } }]
        });
        assert_eq!(
            classify(&event),
            Some(EventCategory::Sns {
                topic_arns: vec!["arn:topic".to_string()],
            })
        );
    }

    #[test]
    fn test_scheduled_wins_over_event_bridge() {
        let event = json!({
            "detail-type": "Scheduled Event",
            "source": "aws.events",
            "resources": ["arn:aws:events:rule/nightly"],
        });
        assert_eq!(
            classify(&event),
            Some(EventCategory::Scheduled {
                resources: vec!["arn:aws:events:rule/nightly".to_string()],
            })
        );
    }

    #[test]
    fn test_scheduled_detail_type_is_case_insensitive() {
        let event = json!({ "detail-type": "SCHEDULED EVENT", "resources": [] });
        assert_eq!(classify(&event).map(|c| c.kind()), Some(EventKind::Scheduled));
    }

    #[test]
    fn test_dynamodb_stream_suffix_removed() {
        let event = json!({
            "Records": [{
                "eventSource": "aws:dynamodb",
                "eventSourceARN": "arn:aws:dynamodb:eu-west-1:1:table/Orders/stream/2020-01-01T00:00:00.000",
            }]
        });
        assert_eq!(
            classify(&event),
            Some(EventCategory::DynamoDbStream {
                table_arns: vec!["arn:aws:dynamodb:eu-west-1:1:table/Orders".to_string()],
            })
        );
    }

    #[test]
    fn test_kinesis_stream() {
        let event = json!({
            "Records": [{ "eventSource": "aws:kinesis", "eventSourceARN": "arn:kinesis" }]
        });
        assert_eq!(classify(&event).map(|c| c.kind()), Some(EventKind::KinesisStream));
    }

    #[test]
    fn test_event_bridge() {
        let event = json!({ "detail-type": "RDS DB Instance Event", "source": "aws.rds" });
        assert_eq!(
            classify(&event),
            Some(EventCategory::EventBridge {
                detail_type: "RDS DB Instance Event".to_string(),
                source: "aws.rds".to_string(),
            })
        );
    }

    #[test]
    fn test_s3_bucket_arn() {
        let event = json!({
            "Records": [{ "eventSource": "aws:s3", "s3": { "bucket": { "arn": "arn:aws:s3:::uploads" } } }]
        });
        assert_eq!(
            classify(&event),
            Some(EventCategory::S3 {
                bucket_arns: vec!["arn:aws:s3:::uploads".to_string()],
            })
        );
    }

    #[test]
    fn test_mixed_record_sources() {
        // One SQS record is enough to claim the batch.
        let event = json!({
            "Records": [
                { "eventSource": "aws:kinesis", "eventSourceARN": "arn:k" },
                { "eventSource": "aws:sqs", "eventSourceARN": "arn:q" },
            ]
        });
        assert_eq!(classify(&event).map(|c| c.kind()), Some(EventKind::Sqs));
    }

    #[test]
    fn test_unknown_shapes() {
        assert_eq!(classify(&json!({})), None);
        assert_eq!(classify(&json!(null)), None);
        assert_eq!(classify(&json!([1, 2, 3])), None);
        assert_eq!(classify(&json!({ "Records": "nope" })), None);
        assert_eq!(classify(&json!({ "Records": [{ "eventSource": 7 }] })), None);
    }

    #[test]
    fn test_summary() {
        let category = EventCategory::ApiGateway {
            method: "GET".to_string(),
            resource: "/users".to_string(),
        };
        assert_eq!(category.summary(), "GET /users request");
        assert_eq!(
            EventCategory::Sqs { source_arns: vec![] }.summary(),
            "SQS event"
        );
    }

    #[test]
    fn test_probe_order_starts_with_http() {
        let kinds: Vec<_> = PROBE_ORDER.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds[0], EventKind::ApiGatewayProxy);
        assert_eq!(kinds[1], EventKind::ApiGateway);
        let scheduled = kinds.iter().position(|k| *k == EventKind::Scheduled);
        let bridge = kinds.iter().position(|k| *k == EventKind::EventBridge);
        assert!(scheduled < bridge);
    }

    #[test]
    fn test_is_api_gateway_event() {
        assert!(is_api_gateway_event(&json!({ "resource": "/x", "httpMethod": "GET" })));
        assert!(!is_api_gateway_event(&json!({ "detail-type": "x", "source": "y" })));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn classify_never_panics_on_arbitrary_strings(key in ".{0,12}", value in ".{0,24}") {
                let event = json!({ key: value });
                let _ = classify(&event);
            }

            #[test]
            fn table_arn_is_prefix(arn in "[a-z:/0-9]{0,40}") {
                prop_assert!(arn.starts_with(table_arn(&arn)));
            }
        }
    }
}

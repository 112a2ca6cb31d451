//! Route keys.

use crate::path::normalize_path;
use http::Method;
use std::fmt;

/// Event sources routed by a single ARN-like identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    /// SQS queue ARN.
    Sqs,
    /// SNS topic ARN.
    Sns,
    /// Scheduler rule ARN.
    Schedule,
    /// DynamoDB table ARN.
    DynamoDb,
    /// Kinesis stream ARN.
    Kinesis,
    /// S3 bucket ARN.
    S3,
}

impl SourceKind {
    /// Prefix used in the stringified key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqs => "sqs",
            Self::Sns => "sns",
            Self::Schedule => "schedule",
            Self::DynamoDb => "dynamodb",
            Self::Kinesis => "kinesis",
            Self::S3 => "s3",
        }
    }
}

/// The identifying value a handler method is registered under.
///
/// Source keys are namespaced by [`SourceKind`], so the same ARN registered
/// for two different sources never collides.
///
/// # Example
///
/// ```
/// use lambaa_router::{RouteKey, SourceKind};
/// use http::Method;
///
/// let key = RouteKey::http(Method::GET, "users/{id}");
/// assert_eq!(key.to_string(), "/users/{id}#GET");
///
/// let key = RouteKey::event_bridge("aws.RDS", "RDS DB Instance Event");
/// assert_eq!(key.to_string(), "eventbridge:rds db instance event|aws.rds");
///
/// let key = RouteKey::source(SourceKind::Sqs, "arn:aws:sqs:eu-west-1:1:jobs");
/// assert_eq!(key.to_string(), "sqs:arn:aws:sqs:eu-west-1:1:jobs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteKey {
    /// An HTTP verb and a normalized resource template.
    Http {
        /// HTTP verb.
        method: Method,
        /// Template path, always starting with `/`.
        path: String,
    },
    /// A single source identifier.
    Source {
        /// Which kind of source the identifier names.
        kind: SourceKind,
        /// The identifier, compared exactly.
        arn: String,
    },
    /// An EventBridge `(detail-type, source)` pair, both lowercased.
    EventBridge {
        /// Lowercased `detail-type`.
        detail_type: String,
        /// Lowercased `source`.
        source: String,
    },
}

impl RouteKey {
    /// HTTP key; the path is normalized to start with `/`.
    #[must_use]
    pub fn http(method: Method, path: &str) -> Self {
        Self::Http {
            method,
            path: normalize_path(path),
        }
    }

    /// Source key for the given kind.
    #[must_use]
    pub fn source(kind: SourceKind, arn: impl Into<String>) -> Self {
        Self::Source {
            kind,
            arn: arn.into(),
        }
    }

    /// EventBridge key. Both parts are compared case-insensitively.
    #[must_use]
    pub fn event_bridge(source: &str, detail_type: &str) -> Self {
        Self::EventBridge {
            detail_type: detail_type.to_lowercase(),
            source: source.to_lowercase(),
        }
    }

    /// Returns `true` for HTTP keys.
    #[must_use]
    pub const fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { method, path } => write!(f, "{path}#{method}"),
            Self::Source { kind, arn } => write!(f, "{}:{arn}", kind.as_str()),
            Self::EventBridge {
                detail_type,
                source,
            } => write!(f, "eventbridge:{detail_type}|{source}"),
        }
    }
}

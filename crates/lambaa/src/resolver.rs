//! Destination resolution.
//!
//! Groups are tried in registration order and the first group whose route
//! table claims the event wins. Within a batch, records are tried in order
//! and the first registered identifier wins.

use crate::group::{GroupOptions, HandlerGroup, HandlerMethod};
use http::Method;
use lambaa_core::EventCategory;
use lambaa_router::{Params, RouteKey, RouteTable, SourceKind};

/// The handler group and method an event resolved to.
#[derive(Debug, Clone)]
pub struct Destination<'a> {
    /// The group that claimed the event.
    pub group: &'a HandlerGroup,
    /// The method within the group.
    pub method: &'a HandlerMethod,
    /// Placeholders captured by a proxy match; empty otherwise.
    pub path_params: Params,
}

impl Destination<'_> {
    /// Method id of the destination.
    #[must_use]
    pub fn method_id(&self) -> &str {
        self.method.id()
    }

    /// Configuration of the destination group.
    #[must_use]
    pub fn options(&self) -> &GroupOptions {
        self.group.options()
    }
}

/// Finds the destination for a classified event.
///
/// Groups without routes are skipped. Returns `None` if no group claims the
/// event.
#[must_use]
pub fn resolve<'a>(groups: &'a [HandlerGroup], category: &EventCategory) -> Option<Destination<'a>> {
    groups
        .iter()
        .filter(|group| group.is_routable())
        .find_map(|group| resolve_in_group(group, category))
}

fn resolve_in_group<'a>(group: &'a HandlerGroup, category: &EventCategory) -> Option<Destination<'a>> {
    let routes = group.routes();
    let base_path = group.options().base_path();

    let (method_id, path_params) = match category {
        EventCategory::ApiGatewayProxy { method, path } => {
            let method = parse_method(method)?;
            let found = routes.match_path(path, &method, base_path)?;
            (found.method_id, found.params)
        }
        EventCategory::ApiGateway { method, resource } => {
            let method = parse_method(method)?;
            (routes.get_http_route(&method, resource, base_path)?, Params::new())
        }
        EventCategory::Sqs { source_arns } => (source(routes, SourceKind::Sqs, source_arns)?, Params::new()),
        EventCategory::Sns { topic_arns } => (source(routes, SourceKind::Sns, topic_arns)?, Params::new()),
        EventCategory::Scheduled { resources } => {
            (source(routes, SourceKind::Schedule, resources)?, Params::new())
        }
        EventCategory::DynamoDbStream { table_arns } => {
            (source(routes, SourceKind::DynamoDb, table_arns)?, Params::new())
        }
        EventCategory::KinesisStream { source_arns } => {
            (source(routes, SourceKind::Kinesis, source_arns)?, Params::new())
        }
        EventCategory::S3 { bucket_arns } => (source(routes, SourceKind::S3, bucket_arns)?, Params::new()),
        EventCategory::EventBridge {
            detail_type,
            source,
        } => (
            routes.get_route(&RouteKey::event_bridge(source, detail_type))?,
            Params::new(),
        ),
    };

    Some(Destination {
        group,
        method: group.method(method_id)?,
        path_params,
    })
}

fn source<'t>(routes: &'t RouteTable, kind: SourceKind, arns: &[String]) -> Option<&'t str> {
    routes.get_source_route(kind, arns.iter().map(String::as_str))
}

fn parse_method(method: &str) -> Option<Method> {
    Method::from_bytes(method.as_bytes()).ok()
}

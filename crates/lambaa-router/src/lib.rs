//! Route tables and path-template matching for Lambaa.
//!
//! Every handler group owns a [`RouteTable`] mapping [`RouteKey`]s to method
//! ids. HTTP keys pair a verb with a path template; every other event source
//! is keyed by an identifier such as a queue or bucket ARN.
//!
//! Two HTTP lookups are supported:
//!
//! - **Resource lookup** ([`RouteTable::get_http_route`]): API Gateway has
//!   already resolved the template, so the lookup is exact after the group
//!   base path is stripped.
//! - **Proxy lookup** ([`RouteTable::match_path`]): only the concrete path is
//!   known, so every template is matched segment by segment and the first
//!   match in registration order wins, returning the captured [`Params`].
//!
//! # Example
//!
//! ```rust
//! use lambaa_router::{RouteKey, RouteTable, SourceKind};
//! use http::Method;
//!
//! let mut table = RouteTable::new();
//! table.add_route(RouteKey::http(Method::GET, "/orders/{id}"), "getOrder");
//! table.add_route(RouteKey::source(SourceKind::Sqs, "arn:aws:sqs:eu-west-1:1:orders"), "onOrder");
//!
//! let found = table.match_path("/orders/7", &Method::GET, None).unwrap();
//! assert_eq!(found.method_id, "getOrder");
//! assert_eq!(found.params.get("id"), Some("7"));
//!
//! let queued = table.get_source_route(SourceKind::Sqs, ["arn:aws:sqs:eu-west-1:1:orders"]);
//! assert_eq!(queued, Some("onOrder"));
//! ```

mod key;
mod params;
mod path;
mod table;

pub use key::{RouteKey, SourceKind};
pub use params::Params;
pub use path::{
    join_base_path, match_template, normalize_base_path, normalize_path, placeholder_name,
    strip_base_path,
};
pub use table::RouteTable;

/// A matched route with its method id and captured parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// Method id registered for the matched key.
    pub method_id: &'a str,
    /// Captured path parameters.
    pub params: Params,
}

impl<'a> RouteMatch<'a> {
    /// Creates a route match.
    #[must_use]
    pub fn new(method_id: &'a str, params: Params) -> Self {
        Self { method_id, params }
    }
}

//! Per-group route table.

use crate::key::{RouteKey, SourceKind};
use crate::path::{join_base_path, match_template, strip_base_path};
use crate::RouteMatch;
use http::Method;
use indexmap::IndexMap;

/// Maps route keys to method ids for one handler group.
///
/// Entries keep their registration order; the proxy scan in
/// [`RouteTable::match_path`] walks them in that order and returns the first
/// template that matches. Re-registering a key replaces its method id in place.
///
/// # Example
///
/// ```
/// use lambaa_router::{RouteKey, RouteTable};
/// use http::Method;
///
/// let mut table = RouteTable::new();
/// table.add_route(RouteKey::http(Method::GET, "/users/{id}"), "getUser");
///
/// let found = table.match_path("/api/users/12", &Method::GET, Some("/api")).unwrap();
/// assert_eq!(found.method_id, "getUser");
/// assert_eq!(found.params.get("id"), Some("12"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: IndexMap<RouteKey, String>,
}

impl RouteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `method_id` under `key`, returning the method id it replaced.
    pub fn add_route(&mut self, key: RouteKey, method_id: impl Into<String>) -> Option<String> {
        self.routes.insert(key, method_id.into())
    }

    /// Drops every key registered for `method_id`, returning how many went.
    pub fn remove_method(&mut self, method_id: &str) -> usize {
        let before = self.routes.len();
        self.routes.retain(|_, id| id != method_id);
        before - self.routes.len()
    }

    /// Exact lookup.
    #[must_use]
    pub fn get_route(&self, key: &RouteKey) -> Option<&str> {
        self.routes.get(key).map(String::as_str)
    }

    /// Exact lookup of the first identifier in `arns` registered for `kind`.
    #[must_use]
    pub fn get_source_route<'a, I>(&self, kind: SourceKind, arns: I) -> Option<&str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        arns.into_iter()
            .find_map(|arn| self.get_route(&RouteKey::source(kind, arn)))
    }

    /// Non-proxy HTTP lookup.
    ///
    /// `resource` is the template API Gateway resolved, including any base
    /// path; the group's base path is stripped before the lookup.
    #[must_use]
    pub fn get_http_route(
        &self,
        method: &Method,
        resource: &str,
        base_path: Option<&str>,
    ) -> Option<&str> {
        let key = RouteKey::Http {
            method: method.clone(),
            path: strip_base_path(resource, base_path),
        };
        self.get_route(&key)
    }

    /// Proxy lookup: matches a concrete path against every HTTP template.
    ///
    /// The base path is prepended to each stored template before matching.
    /// The first template in registration order wins; there is no ranking by
    /// specificity.
    #[must_use]
    pub fn match_path(
        &self,
        path: &str,
        method: &Method,
        base_path: Option<&str>,
    ) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|(key, method_id)| match key {
            RouteKey::Http {
                method: route_method,
                path: template,
            } if route_method == method => {
                let template = join_base_path(base_path, template);
                match_template(&template, path).map(|params| RouteMatch::new(method_id, params))
            }
            _ => None,
        })
    }

    /// Number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterates `(key, method_id)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&RouteKey, &str)> {
        self.routes.iter().map(|(k, v)| (k, v.as_str()))
    }
}

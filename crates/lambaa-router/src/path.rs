//! Path normalization and template matching.
//!
//! A path template is a `/`-separated list of segments where a segment of the
//! form `{name}` captures the corresponding segment of a concrete path.
//! Templates are always stored with a leading `/`.

use crate::Params;

/// Ensures the path begins with `/`.
///
/// ```
/// use lambaa_router::normalize_path;
///
/// assert_eq!(normalize_path("users"), "/users");
/// assert_eq!(normalize_path("/users"), "/users");
/// assert_eq!(normalize_path(""), "/");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Normalizes a group base path: leading `/`, no trailing `/`.
///
/// Returns `None` for an empty or root base path, which applies no prefix.
#[must_use]
pub fn normalize_base_path(base_path: &str) -> Option<String> {
    let trimmed = base_path.trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{trimmed}"))
    }
}

/// Prepends a base path to a template.
///
/// ```
/// use lambaa_router::join_base_path;
///
/// assert_eq!(join_base_path(Some("test"), "7"), "/test/7");
/// assert_eq!(join_base_path(Some("/test/"), "/7"), "/test/7");
/// assert_eq!(join_base_path(None, "7"), "/7");
/// ```
#[must_use]
pub fn join_base_path(base_path: Option<&str>, template: &str) -> String {
    let template = normalize_path(template);
    match base_path.and_then(normalize_base_path) {
        Some(base) if template == "/" => base,
        Some(base) => format!("{base}{template}"),
        None => template,
    }
}

/// Removes a base path from the front of a normalized path.
///
/// The prefix is only removed at a segment boundary; a path that does not
/// start with the base path is returned unchanged.
///
/// ```
/// use lambaa_router::strip_base_path;
///
/// assert_eq!(strip_base_path("/test/7", Some("/test")), "/7");
/// assert_eq!(strip_base_path("/test", Some("test")), "/");
/// assert_eq!(strip_base_path("/testing/7", Some("/test")), "/testing/7");
/// ```
#[must_use]
pub fn strip_base_path(path: &str, base_path: Option<&str>) -> String {
    let path = normalize_path(path);
    let Some(base) = base_path.and_then(normalize_base_path) else {
        return path;
    };
    match path.strip_prefix(base.as_str()) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => path,
    }
}

/// Returns the placeholder name if `segment` has the form `{name}`.
#[must_use]
pub fn placeholder_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .filter(|name| !name.is_empty())
}

/// Matches a concrete path against a template, segment by segment.
///
/// Both must have the same number of segments. Placeholder segments capture
/// the concrete segment, which must be non-empty; literal segments must be
/// equal. No backtracking and no greedy segments.
///
/// ```
/// use lambaa_router::match_template;
///
/// let params = match_template("/orders/{id}", "/orders/17").unwrap();
/// assert_eq!(params.get("id"), Some("17"));
///
/// assert!(match_template("/orders/{id}", "/orders/17/items").is_none());
/// ```
#[must_use]
pub fn match_template(template: &str, path: &str) -> Option<Params> {
    let template = normalize_path(template);
    let path = normalize_path(path);

    if template.split('/').count() != path.split('/').count() {
        return None;
    }

    let mut params = Params::new();
    // Index 0 is the empty string before the leading slash.
    for (expected, actual) in template.split('/').zip(path.split('/')).skip(1) {
        match placeholder_name(expected) {
            Some(name) if !actual.is_empty() => params.push(name, actual),
            None if expected == actual => {}
            _ => return None,
        }
    }
    Some(params)
}

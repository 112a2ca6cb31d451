//! Captured path parameters.
//!
//! Proxy requests carry a concrete path; matching it against a template such
//! as `/users/{id}/orders/{orderId}` yields one `(name, value)` pair per
//! placeholder. Most templates have only a handful of placeholders, so pairs
//! are stored inline.

use smallvec::SmallVec;

/// Number of pairs stored without a heap allocation.
const INLINE_PARAMS: usize = 4;

/// Path parameters captured by a template match, in template order.
///
/// # Example
///
/// ```rust
/// use lambaa_router::Params;
///
/// let mut params = Params::new();
/// params.push("userId", "42");
///
/// assert_eq!(params.get("userId"), Some("42"));
/// assert!(params.contains("userId"));
/// assert_eq!(params.get("orderId"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    pairs: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a captured pair. A repeated name keeps both pairs; lookups
    /// return the first.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Returns the value captured for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `name` was captured.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns `true` if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of captured pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Iterates pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = smallvec::IntoIter<[(String, String); INLINE_PARAMS]>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params.len(), 0);
        assert!(!params.contains("id"));
    }

    #[test]
    fn test_capture_order_is_preserved() {
        let params: Params = [("org", "acme"), ("user", "7")].into_iter().collect();
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("org", "acme"), ("user", "7")]);
    }

    #[test]
    fn test_repeated_name_returns_first() {
        let mut params = Params::new();
        params.push("id", "1");
        params.push("id", "2");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("id"), Some("1"));
    }

    #[test]
    fn test_spills_past_inline_capacity() {
        let params: Params = (0..10).map(|i| (format!("k{i}"), format!("v{i}"))).collect();
        assert_eq!(params.len(), 10);
        assert_eq!(params.get("k9"), Some("v9"));
    }

    #[test]
    fn test_into_iter_owned() {
        let params: Params = [("a", "1")].into_iter().collect();
        let owned: Vec<(String, String)> = params.into_iter().collect();
        assert_eq!(owned, vec![("a".to_string(), "1".to_string())]);
    }
}

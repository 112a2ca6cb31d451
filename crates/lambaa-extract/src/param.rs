//! Parameter extraction rules.
//!
//! A [`Param`] describes where one handler argument comes from and how its
//! raw string value is converted.

use lambaa_core::RequestError;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Custom decoder run over the whole event.
pub type DecodeFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Custom coercion of a raw string value.
pub type CoerceFn = Arc<dyn Fn(&str) -> Result<Value, RequestError> + Send + Sync>;

/// Where a parameter is read from.
///
/// Rules are applied in the order the variants are declared here,
/// independent of the argument slot they fill.
#[derive(Clone)]
pub enum ParamSource {
    /// The request body, parsed as JSON.
    Body,
    /// A `queryStringParameters` entry.
    Query(String),
    /// A `pathParameters` entry.
    Path(String),
    /// A `headers` entry; matched exactly, then ignoring ASCII case.
    Header(String),
    /// A value computed from the event by a custom decoder.
    Decoded(DecodeFn),
}

impl ParamSource {
    /// Position of this source in the extraction order.
    #[must_use]
    pub const fn stage(&self) -> u8 {
        match self {
            Self::Body => 0,
            Self::Query(_) => 1,
            Self::Path(_) => 2,
            Self::Header(_) => 3,
            Self::Decoded(_) => 4,
        }
    }

    /// The parameter name, for named sources.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Query(name) | Self::Path(name) | Self::Header(name) => Some(name),
            Self::Body | Self::Decoded(_) => None,
        }
    }
}

impl fmt::Debug for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body => f.write_str("Body"),
            Self::Query(name) => f.debug_tuple("Query").field(name).finish(),
            Self::Path(name) => f.debug_tuple("Path").field(name).finish(),
            Self::Header(name) => f.debug_tuple("Header").field(name).finish(),
            Self::Decoded(_) => f.write_str("Decoded(..)"),
        }
    }
}

impl fmt::Display for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body => write!(f, "body"),
            Self::Query(name) => write!(f, "query parameter '{name}'"),
            Self::Path(name) => write!(f, "path parameter '{name}'"),
            Self::Header(name) => write!(f, "header '{name}'"),
            Self::Decoded(_) => write!(f, "decoded value"),
        }
    }
}

/// Declared type of a string-valued parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamType {
    /// Passed through unchanged.
    #[default]
    String,
    /// Parsed as a number; non-numeric input is an error.
    Number,
    /// `true` if the value equals `"true"` ignoring case, otherwise `false`.
    Boolean,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
            Self::Boolean => write!(f, "boolean"),
        }
    }
}

/// How a raw value becomes the argument value.
#[derive(Clone)]
pub enum Coercion {
    /// Built-in conversion to the declared type.
    Infer(ParamType),
    /// User-supplied conversion.
    Custom(CoerceFn),
}

impl Default for Coercion {
    fn default() -> Self {
        Self::Infer(ParamType::String)
    }
}

impl fmt::Debug for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infer(ty) => f.debug_tuple("Infer").field(ty).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One declared handler parameter.
///
/// # Example
///
/// ```
/// use lambaa_extract::Param;
///
/// let page = Param::query("page").number().optional();
/// assert!(!page.is_required());
///
/// let id = Param::path("id");
/// assert!(id.is_required());
/// ```
#[derive(Debug, Clone)]
pub struct Param {
    source: ParamSource,
    required: bool,
    coercion: Coercion,
}

impl Param {
    fn new(source: ParamSource) -> Self {
        Self {
            source,
            required: true,
            coercion: Coercion::default(),
        }
    }

    /// The request body, parsed as JSON.
    #[must_use]
    pub fn body() -> Self {
        Self::new(ParamSource::Body)
    }

    /// A query string parameter.
    #[must_use]
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(ParamSource::Query(name.into()))
    }

    /// A path parameter.
    #[must_use]
    pub fn path(name: impl Into<String>) -> Self {
        Self::new(ParamSource::Path(name.into()))
    }

    /// A header.
    #[must_use]
    pub fn header(name: impl Into<String>) -> Self {
        Self::new(ParamSource::Header(name.into()))
    }

    /// A value computed from the event. Never fails and never coerced.
    #[must_use]
    pub fn decoded<F>(decode: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self {
            source: ParamSource::Decoded(Arc::new(decode)),
            required: false,
            coercion: Coercion::default(),
        }
    }

    /// Marks the parameter optional: absent values become `None`.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets whether the parameter is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Declares the parameter a number.
    #[must_use]
    pub fn number(self) -> Self {
        self.typed(ParamType::Number)
    }

    /// Declares the parameter a boolean.
    #[must_use]
    pub fn boolean(self) -> Self {
        self.typed(ParamType::Boolean)
    }

    /// Declares the parameter a string (the default).
    #[must_use]
    pub fn string(self) -> Self {
        self.typed(ParamType::String)
    }

    /// Declares the parameter type.
    #[must_use]
    pub fn typed(mut self, ty: ParamType) -> Self {
        self.coercion = Coercion::Infer(ty);
        self
    }

    /// Replaces the built-in conversion.
    #[must_use]
    pub fn coerce<F>(mut self, coerce: F) -> Self
    where
        F: Fn(&str) -> Result<Value, RequestError> + Send + Sync + 'static,
    {
        self.coercion = Coercion::Custom(Arc::new(coerce));
        self
    }

    /// Returns the source.
    #[must_use]
    pub const fn source(&self) -> &ParamSource {
        &self.source
    }

    /// Returns `true` if an absent value is an error.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the conversion.
    #[must_use]
    pub const fn coercion(&self) -> &Coercion {
        &self.coercion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let param = Param::query("q");
        assert!(param.is_required());
        assert!(matches!(param.coercion(), Coercion::Infer(ParamType::String)));
        assert_eq!(param.source().name(), Some("q"));
    }

    #[test]
    fn test_decoded_is_never_required() {
        let param = Param::decoded(|event| event["requestContext"]["stage"].clone());
        assert!(!param.is_required());
        assert_eq!(param.source().name(), None);
        match param.source() {
            ParamSource::Decoded(decode) => {
                assert_eq!(decode(&json!({"requestContext": {"stage": "prod"}})), json!("prod"));
            }
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn test_stage_order() {
        let stages: Vec<u8> = [
            Param::body(),
            Param::query("a"),
            Param::path("b"),
            Param::header("c"),
            Param::decoded(|_| Value::Null),
        ]
        .iter()
        .map(|p| p.source().stage())
        .collect();
        assert_eq!(stages, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Param::query("page").source().to_string(), "query parameter 'page'");
        assert_eq!(Param::body().source().to_string(), "body");
        assert_eq!(ParamType::Number.to_string(), "number");
    }

    #[test]
    fn test_modifiers() {
        let param = Param::header("x-count").number().optional();
        assert!(!param.is_required());
        assert!(matches!(param.coercion(), Coercion::Infer(ParamType::Number)));
        let param = param.required(true).coerce(|raw| Ok(json!(raw.len())));
        assert!(param.is_required());
        assert!(matches!(param.coercion(), Coercion::Custom(_)));
    }
}

//! Handler call arguments.

use lambaa_core::{Error, LambdaContext};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Arguments passed to a handler method.
///
/// Slot `n` holds the value extracted by the `n`-th declared parameter, or
/// `None` if it was optional and absent. The event (as it left the last
/// middleware) and the invocation context always follow the slots.
///
/// # Example
///
/// ```
/// use lambaa_core::LambdaContext;
/// use lambaa_extract::Args;
/// use serde_json::json;
///
/// let args = Args::with_params(vec![Some(json!(5)), None], json!({}), LambdaContext::default());
///
/// assert_eq!(args.get::<u32>(0).unwrap(), Some(5));
/// assert_eq!(args.param(1), None);
/// assert_eq!(args.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Args {
    params: Vec<Option<Value>>,
    event: Value,
    context: LambdaContext,
}

impl Args {
    /// Arguments with no extracted parameters.
    #[must_use]
    pub fn new(event: Value, context: LambdaContext) -> Self {
        Self::with_params(Vec::new(), event, context)
    }

    /// Arguments with extracted parameter slots.
    #[must_use]
    pub fn with_params(params: Vec<Option<Value>>, event: Value, context: LambdaContext) -> Self {
        Self {
            params,
            event,
            context,
        }
    }

    /// Returns the value in slot `index`.
    #[must_use]
    pub fn param(&self, index: usize) -> Option<&Value> {
        self.params.get(index).and_then(Option::as_ref)
    }

    /// Returns the string in slot `index`, if it holds one.
    #[must_use]
    pub fn str(&self, index: usize) -> Option<&str> {
        self.param(index).and_then(Value::as_str)
    }

    /// Deserializes the value in slot `index`.
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<Option<T>, Error> {
        self.param(index)
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(Error::handler)
    }

    /// Deserializes the value in slot `index`, failing if it is absent.
    pub fn require<T: DeserializeOwned>(&self, index: usize) -> Result<T, Error> {
        self.get(index)?
            .ok_or_else(|| Error::msg(format!("argument {index} is absent")))
    }

    /// All parameter slots.
    #[must_use]
    pub fn params(&self) -> &[Option<Value>] {
        &self.params
    }

    /// Total arguments: parameter slots plus the event and context.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len() + 2
    }

    /// Always `false`; the event and context are always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The event.
    #[must_use]
    pub fn event(&self) -> &Value {
        &self.event
    }

    /// The invocation context.
    #[must_use]
    pub fn context(&self) -> &LambdaContext {
        &self.context
    }

    /// Splits into slots, event and context.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Option<Value>>, Value, LambdaContext) {
        (self.params, self.event, self.context)
    }
}

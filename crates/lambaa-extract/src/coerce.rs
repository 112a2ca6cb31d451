//! Built-in value coercion.

use crate::param::{Coercion, ParamType};
use lambaa_core::RequestError;
use serde_json::{Number, Value};

/// Converts a raw string to the declared type.
///
/// - `Number`: surrounding whitespace is ignored; integers stay integers,
///   anything else finite becomes a float. Non-numeric input is an error.
/// - `Boolean`: `true` iff the value equals `"true"` ignoring ASCII case.
/// - `String`: passed through.
///
/// ```
/// use lambaa_extract::{coerce, ParamType};
/// use serde_json::json;
///
/// assert_eq!(coerce("page", "5", ParamType::Number).unwrap(), json!(5));
/// assert_eq!(coerce("flag", "TRUE", ParamType::Boolean).unwrap(), json!(true));
/// assert!(coerce("page", "five", ParamType::Number).is_err());
/// ```
pub fn coerce(name: &str, raw: &str, ty: ParamType) -> Result<Value, RequestError> {
    match ty {
        ParamType::String => Ok(Value::String(raw.to_string())),
        ParamType::Boolean => Ok(Value::Bool(raw.eq_ignore_ascii_case("true"))),
        ParamType::Number => parse_number(raw)
            .map(Value::Number)
            .ok_or_else(|| RequestError::invalid_coercion(name, raw, "number")),
    }
}

/// Applies a declared [`Coercion`].
pub fn apply(name: &str, raw: &str, coercion: &Coercion) -> Result<Value, RequestError> {
    match coercion {
        Coercion::Infer(ty) => coerce(name, raw, *ty),
        Coercion::Custom(convert) => convert(raw),
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(int.into());
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambaa_core::RequestErrorCode;
    use serde_json::json;

    #[test]
    fn test_integer() {
        assert_eq!(coerce("n", "5", ParamType::Number).unwrap(), json!(5));
        assert_eq!(coerce("n", "-12", ParamType::Number).unwrap(), json!(-12));
        assert_eq!(coerce("n", " 7 ", ParamType::Number).unwrap(), json!(7));
    }

    #[test]
    fn test_float() {
        assert_eq!(coerce("n", "2.5", ParamType::Number).unwrap(), json!(2.5));
        assert_eq!(coerce("n", "1e3", ParamType::Number).unwrap(), json!(1000.0));
    }

    #[test]
    fn test_invalid_number() {
        for raw in ["invalid", "", "   ", "NaN", "inf", "5px"] {
            let err = coerce("count", raw, ParamType::Number).unwrap_err();
            assert_eq!(err.code(), RequestErrorCode::InvalidCoercion, "input {raw:?}");
            assert_eq!(err.parameter(), Some("count"));
        }
    }

    #[test]
    fn test_boolean() {
        assert_eq!(coerce("b", "true", ParamType::Boolean).unwrap(), json!(true));
        assert_eq!(coerce("b", "True", ParamType::Boolean).unwrap(), json!(true));
        assert_eq!(coerce("b", "yes", ParamType::Boolean).unwrap(), json!(false));
        assert_eq!(coerce("b", "false", ParamType::Boolean).unwrap(), json!(false));
    }

    #[test]
    fn test_string_passthrough() {
        assert_eq!(coerce("s", "5", ParamType::String).unwrap(), json!("5"));
    }

    #[test]
    fn test_custom_coercion() {
        let coercion = Coercion::Custom(std::sync::Arc::new(|raw: &str| {
            Ok::<_, RequestError>(json!(raw.split(',').collect::<Vec<_>>()))
        }));
        assert_eq!(apply("ids", "a,b", &coercion).unwrap(), json!(["a", "b"]));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_i64_round_trips(n in any::<i64>()) {
                prop_assert_eq!(coerce("n", &n.to_string(), ParamType::Number).unwrap(), json!(n));
            }

            #[test]
            fn alphabetic_input_is_rejected(raw in "[g-z]{1,10}") {
                prop_assert!(coerce("n", &raw, ParamType::Number).is_err());
            }
        }
    }
}

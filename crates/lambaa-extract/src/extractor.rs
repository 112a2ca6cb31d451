//! Builds handler arguments from an event.

use crate::args::Args;
use crate::coerce::apply;
use crate::param::{Coercion, Param, ParamSource};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use lambaa_core::event::is_api_gateway_event;
use lambaa_core::{LambdaContext, RequestError};
use serde_json::Value;
use std::borrow::Cow;

/// Builds the arguments for a handler with the given parameter rules.
///
/// Rules only apply to API Gateway events; for every other event the result
/// has no parameter slots. Rules run grouped by source (body, query, path,
/// header, decoded) and in declaration order within a source; each writes the
/// slot matching its declaration index. The first failing rule aborts.
///
/// # Example
///
/// ```
/// use lambaa_core::LambdaContext;
/// use lambaa_extract::{build_args, Param};
/// use serde_json::json;
///
/// let event = json!({
///     "resource": "/orders/{id}",
///     "httpMethod": "GET",
///     "pathParameters": { "id": "17" },
///     "queryStringParameters": { "expand": "true" },
/// });
///
/// let rules = [Param::path("id").number(), Param::query("expand").boolean().optional()];
/// let args = build_args(&rules, event, LambdaContext::default()).unwrap();
///
/// assert_eq!(args.param(0), Some(&json!(17)));
/// assert_eq!(args.param(1), Some(&json!(true)));
/// ```
pub fn build_args(
    rules: &[Param],
    event: Value,
    context: LambdaContext,
) -> Result<Args, RequestError> {
    if !is_api_gateway_event(&event) {
        return Ok(Args::new(event, context));
    }

    let mut order: Vec<usize> = (0..rules.len()).collect();
    order.sort_by_key(|&index| rules[index].source().stage());

    let mut params = vec![None; rules.len()];
    for index in order {
        params[index] = extract(&rules[index], &event)?;
    }
    Ok(Args::with_params(params, event, context))
}

/// Applies one rule to an event.
///
/// Returns `Ok(None)` for an optional parameter that is absent.
pub fn extract(param: &Param, event: &Value) -> Result<Option<Value>, RequestError> {
    match param.source() {
        ParamSource::Body => extract_body(param, event),
        ParamSource::Query(name) => convert(
            param,
            name,
            lookup(event, "queryStringParameters", name),
            RequestError::missing_query_parameter,
        ),
        ParamSource::Path(name) => convert(
            param,
            name,
            lookup(event, "pathParameters", name),
            RequestError::missing_path_parameter,
        ),
        ParamSource::Header(name) => convert(
            param,
            name,
            header(event, name),
            RequestError::missing_header,
        ),
        ParamSource::Decoded(decode) => Ok(Some(decode(event))),
    }
}

fn convert(
    param: &Param,
    name: &str,
    raw: Option<Cow<'_, str>>,
    missing: fn(&str) -> RequestError,
) -> Result<Option<Value>, RequestError> {
    match raw {
        Some(raw) => apply(name, &raw, param.coercion()).map(Some),
        None if param.is_required() => Err(missing(name)),
        None => Ok(None),
    }
}

/// Renders a scalar as its raw string form; empty strings count as absent.
fn scalar(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

fn lookup<'a>(event: &'a Value, map: &str, name: &str) -> Option<Cow<'a, str>> {
    event.get(map)?.get(name).and_then(scalar)
}

fn header<'a>(event: &'a Value, name: &str) -> Option<Cow<'a, str>> {
    let headers = event.get("headers")?.as_object()?;
    headers
        .get(name)
        .or_else(|| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
        .and_then(scalar)
}

fn extract_body(param: &Param, event: &Value) -> Result<Option<Value>, RequestError> {
    let raw = match event.get("body") {
        Some(Value::String(body)) if !body.is_empty() => body,
        Some(Value::String(_) | Value::Null) | None => {
            return if param.is_required() {
                Err(RequestError::missing_request_body())
            } else {
                Ok(None)
            };
        }
        // Already structured, e.g. from a test harness.
        Some(structured) => return Ok(Some(structured.clone())),
    };

    let text = if event.get("isBase64Encoded").and_then(Value::as_bool) == Some(true) {
        let bytes = STANDARD
            .decode(raw)
            .map_err(RequestError::invalid_request_body)?;
        Cow::Owned(String::from_utf8(bytes).map_err(RequestError::invalid_request_body)?)
    } else {
        Cow::Borrowed(raw.as_str())
    };

    match param.coercion() {
        Coercion::Custom(convert) => convert(&*text).map(Some),
        Coercion::Infer(_) => serde_json::from_str(&text)
            .map(Some)
            .map_err(RequestError::invalid_request_body),
    }
}

//! # Lambaa Extract
//!
//! Declarative parameter extraction from API Gateway events.
//!
//! A handler method declares one [`Param`] per argument it wants. At call
//! time [`build_args`] applies those rules to the event and produces the
//! handler's [`Args`].
//!
//! | Rule | Reads | Missing (when required) |
//! |------|-------|-------------------------|
//! | [`Param::body`] | `body`, parsed as JSON | `MISSING_REQUEST_DATA` |
//! | [`Param::query`] | `queryStringParameters[name]` | `MISSING_QUERY_PARAMETER` |
//! | [`Param::path`] | `pathParameters[name]` | `MISSING_PATH_PARAMETER` |
//! | [`Param::header`] | `headers[name]` | `MISSING_HEADER` |
//! | [`Param::decoded`] | anything, via a custom decoder | never fails |
//!
//! String values are converted according to the declared [`ParamType`]; a
//! value that cannot be converted fails with `INVALID_COERCION`.

#![doc(html_root_url = "https://docs.rs/lambaa-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod args;
mod coerce;
mod extractor;
mod param;

pub use args::Args;
pub use coerce::{apply, coerce};
pub use extractor::{build_args, extract};
pub use param::{CoerceFn, Coercion, DecodeFn, Param, ParamSource, ParamType};

//! # Lambaa Core
//!
//! Core types shared by every Lambaa crate:
//!
//! - [`EventCategory`] / [`classify`] - Structural classification of inbound events
//! - [`LambdaContext`] - Per-invocation metadata supplied by the host runtime
//! - [`Error`] - Routing, request and handler failures
//! - [`RouterError`] / [`RequestError`] - Coded errors with stable identifiers

#![doc(html_root_url = "https://docs.rs/lambaa-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod error;
pub mod event;

pub use context::LambdaContext;
pub use error::{Error, RequestError, RequestErrorCode, Result, RouterError, RouterErrorCode};
pub use event::{classify, EventCategory, EventKind};

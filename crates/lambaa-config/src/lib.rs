//! Typed configuration for Lambaa functions.
//!
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict parsing (fails on unknown fields)
//! - Layered loading (defaults → file → `.env` → environment)
//!
//! # Configuration File Format
//!
//! ```toml
//! [router]
//! debug = false
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! include_location = false
//! ```
//!
//! # Environment Variable Overrides
//!
//! With [`ConfigLoader::with_env_prefix`], values can be overridden using
//! `PREFIX__SECTION__KEY`:
//!
//! - `LAMBAA__ROUTER__DEBUG=true`
//! - `LAMBAA__LOGGING__LEVEL=debug`
//! - `LAMBAA__LOGGING__FORMAT=pretty`
//!
//! Independently of the prefix, `DEBUG=true` turns on router debug output.

#![doc(html_root_url = "https://docs.rs/lambaa-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;

pub use config::{LambaaConfig, LogFormat, LoggingConfig, RouterSection, LOG_LEVELS};
pub use error::ConfigError;
pub use loader::{ConfigLoader, DEBUG_VAR};

//! Bind prefixed environment variables to typed configuration fields.
//!
//! This crate provides a small, explicit way to load configuration from the
//! environment without a full configuration framework.
//!
//! # Modules
//!
//! - `binder` - [`EnvBinder`], which owns the prefix and the variable source
//! - `key` - Tag normalization and key building
//! - `target` - Typed destinations and value coercion
//! - `fields` - Declarative field lists for bulk binding
//! - `decode` - Base64 helpers with optional length checks
//! - `env` - Variable sources (process environment, in-memory map)
//!
//! # Example
//!
//! ```rust,ignore
//! use envbind::EnvBinder;
//!
//! let binder = EnvBinder::with_prefix("MYAPP_");
//!
//! let mut port = 8080i64;
//! let mut hosts = vec!["localhost".to_string()];
//! binder.bind("port", &mut port)?;        // MYAPP_PORT
//! binder.bind("allowed-hosts", &mut hosts)?; // MYAPP_ALLOWED_HOSTS, comma separated
//! ```
//!
//! Unset variables leave the destination alone, so defaults are assigned
//! before binding. Binding does no locking of its own; load configuration
//! during startup before the environment is mutated by other threads.

pub mod binder;
pub mod decode;
pub mod env;
pub mod error;
pub mod fields;
pub mod key;
pub mod target;

pub use binder::{BinderOptions, EnvBinder};
pub use decode::{decode_base64, decode_base64_bytes};
pub use env::{MapEnv, ReadEnv, SystemEnv};
pub use error::{EnvBindError, FieldErrors, InvalidBool, OutOfRange, Result};
pub use fields::{EnvFields, Fields, FromEnv};
pub use key::{build_env_key, normalize_tag};
pub use target::{parse_bool, Target, TargetKind};

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

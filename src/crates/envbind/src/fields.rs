//! Declarative field lists for binding a whole configuration struct.
//!
//! A configuration type lists its `(name, destination)` pairs once by
//! implementing [`EnvFields`]; [`EnvBinder::bind_all`] then fills every
//! field from one prefix.
//!
//! # Example
//!
//! ```
//! use envbind::{EnvBinder, EnvFields, Fields, FromEnv, MapEnv};
//!
//! #[derive(Debug, Default)]
//! struct AppConfig {
//!     host: String,
//!     port: i64,
//!     debug: bool,
//! }
//!
//! impl EnvFields for AppConfig {
//!     fn env_fields(&mut self) -> Fields<'_> {
//!         Fields::new()
//!             .field("host", &mut self.host)
//!             .field("port", &mut self.port)
//!             .field("debug", &mut self.debug)
//!     }
//! }
//!
//! impl FromEnv for AppConfig {}
//!
//! let env = MapEnv::from_iter([("APP_PORT", "8080"), ("APP_DEBUG", "true")]);
//! let binder = EnvBinder::with_source(Default::default(), env).prefixed("APP_");
//!
//! let config = AppConfig::from_env(&binder).unwrap();
//! assert_eq!(config.port, 8080);
//! assert!(config.debug);
//! assert_eq!(config.host, "");
//! ```
//!
//! [`EnvBinder::bind_all`]: crate::EnvBinder::bind_all

use crate::binder::EnvBinder;
use crate::env::ReadEnv;
use crate::target::Target;
use crate::Result;

/// An ordered list of named binding destinations.
#[derive(Debug, Default)]
pub struct Fields<'a> {
    entries: Vec<(String, Target<'a>)>,
}

impl<'a> Fields<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. `name` is combined with the binder prefix at bind time.
    pub fn field(mut self, name: impl Into<String>, target: impl Into<Target<'a>>) -> Self {
        self.push(name, target);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, target: impl Into<Target<'a>>) {
        self.entries.push((name.into(), target.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for Fields<'a> {
    type Item = (String, Target<'a>);
    type IntoIter = std::vec::IntoIter<(String, Target<'a>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Types that can list their environment-bound fields.
pub trait EnvFields {
    fn env_fields(&mut self) -> Fields<'_>;
}

/// Trait for configuration structures loaded from environment variables
///
/// Provides a consistent pattern of default creation, bulk binding and
/// validation on top of [`EnvFields`].
pub trait FromEnv: EnvFields + Default {
    /// Validate the configuration
    ///
    /// Returns an error if the configuration is invalid, conventionally
    /// [`EnvBindError::Invalid`](crate::EnvBindError::Invalid).
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Start from `Default`, bind every field, then validate.
    ///
    /// Variables that are not set keep their default values.
    fn from_env<E: ReadEnv>(binder: &EnvBinder<E>) -> Result<Self> {
        let mut config = Self::default();
        binder.bind_all(&mut config)?;
        config.validate()?;
        Ok(config)
    }
}

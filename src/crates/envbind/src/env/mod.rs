//! Sources of environment variable values.
//!
//! Binding reads through [`ReadEnv`] so the same code can run against the
//! live process environment or an in-memory snapshot.
//!
//! ```
//! use envbind::env::{MapEnv, ReadEnv, SystemEnv};
//!
//! fn database_url<E: ReadEnv>(env: &E) -> String {
//!     env.var("DATABASE_URL")
//!         .unwrap_or_else(|_| "postgres://localhost".to_string())
//! }
//!
//! let _ = database_url(&SystemEnv);
//!
//! let env = MapEnv::from_iter([("DATABASE_URL", "postgres://test")]);
//! assert_eq!(database_url(&env), "postgres://test");
//! ```

mod map;
mod system;

use std::env::VarError;

pub use map::MapEnv;
pub use system::SystemEnv;

/// Read access to a string-to-string variable store.
///
/// Implementors decide their own thread safety; `EnvBinder<E>` is
/// `Send + Sync` exactly when `E` is.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, VarError>;
}

impl<E: ReadEnv + ?Sized> ReadEnv for &E {
    #[inline]
    fn var(&self, key: &str) -> Result<String, VarError> {
        (**self).var(key)
    }
}

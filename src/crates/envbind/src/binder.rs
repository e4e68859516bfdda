//! The environment binder.
//!
//! An [`EnvBinder`] carries the naming prefix and the variable source, so
//! there is no process-wide state: each binder is an explicit context that
//! can be built once at startup and passed by reference.

use std::env::VarError;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::decode_base64;
use crate::env::{ReadEnv, SystemEnv};
use crate::error::FieldErrors;
use crate::fields::{EnvFields, Fields};
use crate::key::{build_env_key, normalize_tag};
use crate::target::{Target, TargetKind};
use crate::{EnvBindError, Result};

/// Options controlling how tags become variable names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderOptions {
    /// Prepended to every normalized tag, e.g. `"MYAPP_"`.
    pub prefix: String,
    /// Replace `-` with `_` in tags before lookup.
    pub fold_dashes: bool,
}

impl Default for BinderOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            fold_dashes: true,
        }
    }
}

impl BinderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_fold_dashes(mut self, fold_dashes: bool) -> Self {
        self.fold_dashes = fold_dashes;
        self
    }
}

/// Binds environment variables to typed destinations.
///
/// # Example
///
/// ```
/// use envbind::{EnvBinder, MapEnv};
///
/// let env = MapEnv::from_iter([("MYAPP_PORT", "9090")]);
/// let binder = EnvBinder::with_source(Default::default(), env).prefixed("MYAPP_");
///
/// let mut port = 8080i64;
/// let mut host = String::from("localhost");
/// binder.bind("port", &mut port).unwrap();
/// binder.bind("host", &mut host).unwrap();
///
/// assert_eq!(port, 9090);
/// assert_eq!(host, "localhost");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvBinder<E = SystemEnv> {
    options: BinderOptions,
    source: E,
}

impl EnvBinder<SystemEnv> {
    /// Create a binder that reads the process environment.
    pub fn new(options: BinderOptions) -> Self {
        Self::with_source(options, SystemEnv)
    }

    /// Shorthand for a process-environment binder with only a prefix set.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::new(BinderOptions::new().with_prefix(prefix))
    }
}

impl<E: ReadEnv> EnvBinder<E> {
    pub fn with_source(options: BinderOptions, source: E) -> Self {
        Self { options, source }
    }

    /// Replace the prefix, consuming and returning the binder.
    pub fn prefixed(mut self, prefix: impl Into<String>) -> Self {
        self.set_prefix(prefix);
        self
    }

    /// Overwrite the prefix used by every later call on this binder.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.options.prefix = prefix.into();
    }

    pub fn prefix(&self) -> &str {
        &self.options.prefix
    }

    pub fn options(&self) -> &BinderOptions {
        &self.options
    }

    /// The variable name `tag` resolves to.
    pub fn key_for(&self, tag: &str) -> Result<String> {
        normalize_tag(&self.options.prefix, tag, self.options.fold_dashes)
    }

    /// Bind the variable named by `tag` into `target`.
    ///
    /// A missing variable is not an error: the target keeps whatever value
    /// it had, so defaults can be set beforehand. A present but empty value
    /// is still assigned.
    pub fn bind<'a>(&self, tag: &str, target: impl Into<Target<'a>>) -> Result<()> {
        if tag.is_empty() {
            return Err(EnvBindError::EmptyTag);
        }
        let target = target.into();
        if let Target::Absent = target {
            return Err(EnvBindError::NilTarget);
        }

        let key = self.key_for(tag)?;
        if let Target::Unsupported { type_name } = target {
            return Err(EnvBindError::UnsupportedType { key, type_name });
        }

        let kind = target.kind();
        match self.lookup(&key)? {
            Some(value) => {
                target.assign(&key, value)?;
                debug!(key = %key, %kind, "bound environment variable");
            }
            None => debug!(key = %key, %kind, "environment variable not set"),
        }
        Ok(())
    }

    /// Look up `tag` and base64-decode its value into `target`.
    ///
    /// See [`decode_base64`] for the meaning of `expected_size`.
    pub fn bind_base64(&self, tag: &str, target: &mut String, expected_size: usize) -> Result<()> {
        let key = self.key_for(tag)?;
        match self.lookup(&key)? {
            Some(value) => {
                decode_base64(&value, target, expected_size)?;
                debug!(key = %key, "bound base64 environment variable");
            }
            None => debug!(key = %key, "environment variable not set"),
        }
        Ok(())
    }

    /// Bind every field declared by `config`.
    ///
    /// See [`EnvBinder::bind_fields`].
    pub fn bind_all<C: EnvFields + ?Sized>(&self, config: &mut C) -> Result<()> {
        self.bind_fields(config.env_fields())
    }

    /// Bind a declared list of fields.
    ///
    /// Keys are `uppercase(prefix + name)`, with no dash folding and no
    /// prefix detection. Only string, bool and i64 fields are coerced;
    /// other kinds are skipped. Every field is attempted and all failures
    /// are returned together as [`EnvBindError::Fields`].
    pub fn bind_fields(&self, fields: Fields<'_>) -> Result<()> {
        let mut errors = FieldErrors::default();

        for (name, target) in fields {
            let kind = target.kind();
            if !matches!(kind, TargetKind::Str | TargetKind::Bool | TargetKind::I64) {
                debug!(field = %name, %kind, "skipping field with unsupported kind");
                continue;
            }

            let key = build_env_key(&self.options.prefix, &name);
            let result = match self.lookup(&key) {
                Ok(Some(value)) => target.assign(&key, value),
                Ok(None) => Ok(()),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                debug!(key = %key, %kind, "field failed to bind");
                errors.push(e);
            }
        }

        errors.into_result()
    }

    fn lookup(&self, key: &str) -> Result<Option<String>> {
        match self.source.var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(EnvBindError::NotUnicode {
                key: key.to_string(),
            }),
        }
    }
}

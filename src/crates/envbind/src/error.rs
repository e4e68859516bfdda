//! Error types for environment binding.

use std::fmt;

use thiserror::Error;

use crate::target::TargetKind;

/// Result type for binding operations.
pub type Result<T> = std::result::Result<T, EnvBindError>;

/// Errors that can occur while binding or decoding configuration values.
#[derive(Debug, Error)]
pub enum EnvBindError {
    /// The tag argument was empty.
    #[error("tag argument may not be empty")]
    EmptyTag,

    /// No destination was supplied.
    #[error("target argument may not be absent")]
    NilTarget,

    /// The destination type has no coercion rule.
    #[error("unsupported target type {type_name} for {key}")]
    UnsupportedType {
        key: String,
        type_name: &'static str,
    },

    /// The variable is set but its value does not parse into the destination type.
    #[error("failed to parse {key} as {kind}: {source}")]
    Parse {
        key: String,
        kind: TargetKind,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The variable is set but is not valid Unicode.
    #[error("environment variable {key} contains invalid UTF-8")]
    NotUnicode { key: String },

    /// The payload is not valid base64, or does not decode to text.
    #[error("base64 decode failed: {source}")]
    Decode {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The decoded payload length disagrees with the expected size.
    #[error("target size mismatch: expected {expected} bytes, decoded {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A loaded configuration failed its own validation.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// One or more fields failed during bulk binding.
    #[error("{0}")]
    Fields(FieldErrors),
}

impl EnvBindError {
    pub(crate) fn parse(
        key: impl Into<String>,
        kind: TargetKind,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        EnvBindError::Parse {
            key: key.into(),
            kind,
            source: source.into(),
        }
    }

    pub(crate) fn decode(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        EnvBindError::Decode {
            source: source.into(),
        }
    }
}

/// Boolean text that is none of the recognized forms.
///
/// The rejected text is kept for callers but left out of the message, so
/// logging the error never prints a variable's value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid boolean value")]
pub struct InvalidBool(pub String);

/// A float whose magnitude does not fit the destination type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value out of range")]
pub struct OutOfRange;

/// Every failure collected during one bulk binding pass, in field order.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<EnvBindError>,
}

impl FieldErrors {
    pub(crate) fn push(&mut self, error: EnvBindError) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnvBindError> {
        self.errors.iter()
    }

    /// The most recent failure, the only one a last-error-wins caller would see.
    pub fn last(&self) -> Option<&EnvBindError> {
        self.errors.last()
    }

    pub fn into_vec(self) -> Vec<EnvBindError> {
        self.errors
    }

    pub(crate) fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(EnvBindError::Fields(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed to bind", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {}", error)?;
        }
        Ok(())
    }
}

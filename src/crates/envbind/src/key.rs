//! Environment variable naming.
//!
//! Helpers that turn a logical configuration name into the variable name
//! that is looked up.

use crate::{EnvBindError, Result};

/// Normalize a tag into the environment variable name to look up.
///
/// A tag that already starts with `prefix` (compared case-insensitively) and
/// is longer than it is returned as-is. Anything else is uppercased and
/// prefixed. With `fold_dashes`, `-` becomes `_` first.
///
/// # Example
///
/// ```
/// use envbind::normalize_tag;
///
/// assert_eq!(normalize_tag("MYAPP_", "port", true).unwrap(), "MYAPP_PORT");
/// assert_eq!(normalize_tag("MYAPP_", "log-level", true).unwrap(), "MYAPP_LOG_LEVEL");
/// assert_eq!(normalize_tag("MYAPP_", "MYAPP_PORT", true).unwrap(), "MYAPP_PORT");
/// ```
pub fn normalize_tag(prefix: &str, tag: &str, fold_dashes: bool) -> Result<String> {
    if tag.is_empty() {
        return Err(EnvBindError::EmptyTag);
    }

    let tag = if fold_dashes && tag.contains('-') {
        tag.replace('-', "_")
    } else {
        tag.to_string()
    };

    if is_qualified(prefix, &tag) {
        tracing::trace!(key = %tag, "tag already carries prefix");
        return Ok(tag);
    }

    Ok(format!("{}{}", prefix, tag.to_uppercase()))
}

/// True when `tag` is longer than `prefix` and begins with it, ignoring case.
fn is_qualified(prefix: &str, tag: &str) -> bool {
    if tag.len() <= prefix.len() {
        return false;
    }
    match tag.get(..prefix.len()) {
        Some(head) => head.to_uppercase() == prefix.to_uppercase(),
        None => false,
    }
}

/// Build a prefixed environment variable name
///
/// Both parts are uppercased. No dash folding and no prefix detection.
///
/// ```
/// use envbind::build_env_key;
///
/// assert_eq!(build_env_key("app_", "port"), "APP_PORT");
/// ```
pub fn build_env_key(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name).to_uppercase()
}

//! Base64 decoding helpers.
//!
//! Payloads use the standard alphabet with padding.
//!
//! An `expected_size` of `0` disables the length check. Some malformed
//! values still decode without error, so an unchecked decode can succeed
//! with the wrong bytes. Pass the real size whenever it is known (key
//! material, fixed-width tokens).

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::{EnvBindError, Result};

/// Decode `value` and store the bytes in `target`.
///
/// `target` is only written when decoding succeeds and, for a non-zero
/// `expected_size`, the decoded length matches.
pub fn decode_base64_bytes(value: &str, target: &mut Vec<u8>, expected_size: usize) -> Result<()> {
    let decoded = STANDARD.decode(value).map_err(EnvBindError::decode)?;
    check_size(decoded.len(), expected_size)?;
    *target = decoded;
    Ok(())
}

/// Decode `value` as UTF-8 text and store it in `target`.
///
/// # Example
///
/// ```
/// use envbind::decode_base64;
///
/// let mut secret = String::new();
/// decode_base64("aGVsbG8=", &mut secret, 5).unwrap();
/// assert_eq!(secret, "hello");
///
/// assert!(decode_base64("aGVsbG8=", &mut secret, 32).is_err());
/// ```
pub fn decode_base64(value: &str, target: &mut String, expected_size: usize) -> Result<()> {
    let decoded = STANDARD.decode(value).map_err(EnvBindError::decode)?;
    check_size(decoded.len(), expected_size)?;
    *target = String::from_utf8(decoded).map_err(EnvBindError::decode)?;
    Ok(())
}

fn check_size(actual: usize, expected: usize) -> Result<()> {
    if expected > 0 && actual != expected {
        return Err(EnvBindError::SizeMismatch { expected, actual });
    }
    Ok(())
}

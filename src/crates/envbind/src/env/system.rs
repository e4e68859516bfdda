use std::env::{self, VarError};

use super::ReadEnv;

/// Zero-sized type, delegates to `std::env` on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, VarError> {
        env::var(key)
    }
}

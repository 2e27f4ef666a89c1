//! Cache key derivation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key identifying a `(user message, system prompt)` pair.
///
/// The value is a 32-bit rolling hash (`h = h * 31 + unit`, wrapping) over
/// the UTF-16 code units of `"{message}|{system_prompt}"`, rendered as a
/// signed decimal string. Stable across processes and platforms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(user_message: &str, system_prompt: &str) -> Self {
        let input = format!("{}|{}", user_message, system_prompt);
        Self(rolling_hash(&input).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn rolling_hash(input: &str) -> i32 {
    input.encode_utf16().fold(0i32, |hash, unit| {
        // (hash << 5) - hash == hash * 31
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

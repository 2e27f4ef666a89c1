//! Result cache value objects.
//!
//! Storage and expiry policy live in the application layer's `ResultCache`;
//! this module only defines the key and entry shapes.

pub mod entry;
pub mod key;

pub use entry::{CACHE_TTL_MINUTES, CacheEntry};
pub use key::CacheKey;

//! Cache Module
//!
//! Namespaced caching over a shared storage document, with compression
//! and caller-defined expiration.

mod document;
mod entry;
mod store;


// Re-export public types
pub use document::{safe_parse_json, StorageDocument, StoreBucket};
pub use entry::{is_empty_value, CacheEntry};
pub use store::NamespacedCache;

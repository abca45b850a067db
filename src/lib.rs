//! nscache - A namespaced key-value cache over pluggable string storage
//!
//! Multiplexes logical stores and data keys under one storage slot,
//! compresses payloads, and treats expiration and emptiness as cache
//! misses. Ships an in-memory storage backend and a deflate codec; both
//! are pluggable through the [`StorageProvider`] and [`codec::Codec`]
//! traits.

pub mod cache;
pub mod codec;
pub mod config;
pub mod error;
pub mod storage;

pub use cache::NamespacedCache;
pub use config::{always_expires, max_age, never_expires, CacheConfig};
pub use error::{CacheError, CodecError, Result};
pub use storage::{MemoryStorage, StorageProvider};

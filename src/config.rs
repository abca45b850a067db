//! Configuration Module
//!
//! Describes where a cache instance lives inside the shared storage
//! document and when its entry goes stale.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

// == Expiration Predicate ==
/// Staleness predicate over an entry's last-update timestamp.
///
/// Only ever invoked with a recorded timestamp: an entry with no
/// `lastUpdate` is unconditionally treated as expired before the
/// predicate is consulted.
pub type ExpirationPredicate = Box<dyn Fn(DateTime<Utc>) -> bool + Send + Sync>;

// == Cache Config ==
/// Placement and staleness policy for one cache instance.
///
/// Several instances may share a `storage_key`; each addresses its own
/// `(store_name, data_key)` entry within the shared document.
pub struct CacheConfig {
    /// Root key under which the whole namespaced document lives.
    /// An empty string disables writes (reads see an empty document).
    pub storage_key: String,
    /// Logical bucket name scoping a group of related entries
    pub store_name: String,
    /// Entry name within the bucket
    pub data_key: String,
    /// Decides staleness given the last write's timestamp
    pub expiration: ExpirationPredicate,
}

impl CacheConfig {
    // == Constructor ==
    /// Creates a config addressing `(store_name, data_key)` under
    /// `storage_key`, with the given staleness predicate.
    pub fn new(
        storage_key: impl Into<String>,
        store_name: impl Into<String>,
        data_key: impl Into<String>,
        expiration: ExpirationPredicate,
    ) -> Self {
        Self {
            storage_key: storage_key.into(),
            store_name: store_name.into(),
            data_key: data_key.into(),
            expiration,
        }
    }
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("storage_key", &self.storage_key)
            .field("store_name", &self.store_name)
            .field("data_key", &self.data_key)
            .finish_non_exhaustive()
    }
}

// == Predicate Constructors ==
/// Predicate marking entries stale once they are older than `ttl`.
pub fn max_age(ttl: Duration) -> ExpirationPredicate {
    Box::new(move |last_update| Utc::now() - last_update > ttl)
}

/// Predicate that never expires an entry.
///
/// An entry with no recorded timestamp is still treated as expired.
pub fn never_expires() -> ExpirationPredicate {
    Box::new(|_| false)
}

/// Predicate that always expires, effectively disabling reads.
pub fn always_expires() -> ExpirationPredicate {
    Box::new(|_| true)
}

//! Storage Provider Module
//!
//! Abstracts the string-keyed storage slot the cache persists into.
//! The provider is injected explicitly so tests (and hosts without a
//! browser-style storage facility) can supply their own backend.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// == Storage Provider Trait ==
/// Synchronous string-keyed storage.
///
/// Values are opaque strings; `get`/`set` are assumed atomic at the
/// granularity of a single call. The cache performs read-modify-write as
/// two separate calls, so independent cache instances sharing a storage
/// key and driven by interleaved async flows can lose a write. This is an
/// accepted limitation of the single-threaded host model.
pub trait StorageProvider {
    /// Returns the value stored at `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` at `key`, overwriting any previous value.
    fn set(&mut self, key: &str, value: String);
}

// == Memory Storage ==
/// HashMap-backed storage provider.
///
/// The built-in backend for hosts without persistent storage, and the
/// test double used throughout the test suite.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    // == Constructor ==
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl StorageProvider for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.slots.insert(key.to_string(), value);
    }
}

// == Shared Handle ==
/// Shared handle over a provider, so several cache instances can address
/// the same document the way several caches share one browser storage.
///
/// Single-threaded by design, matching the host execution model.
impl<S: StorageProvider> StorageProvider for Rc<RefCell<S>> {
    fn get(&self, key: &str) -> Option<String> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        self.borrow_mut().set(key, value);
    }
}

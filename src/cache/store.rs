//! Namespaced Cache Module
//!
//! The cache component itself: multiplexes logical stores and data keys
//! under one storage slot, compresses payloads, and decides staleness.

use std::future::Future;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::document::{safe_parse_json, StorageDocument};
use crate::cache::entry::is_empty_value;
use crate::codec::{Codec, DeflateCodec};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::storage::StorageProvider;

// == Namespaced Cache ==
/// Cache over one `(store_name, data_key)` entry of a shared document.
///
/// Generic over the storage backend and the compression codec; the codec
/// defaults to [`DeflateCodec`].
#[derive(Debug)]
pub struct NamespacedCache<S: StorageProvider, C: Codec = DeflateCodec> {
    config: CacheConfig,
    storage: S,
    codec: C,
}

impl<S: StorageProvider> NamespacedCache<S> {
    // == Constructor ==
    /// Creates a cache with the default deflate codec.
    pub fn new(config: CacheConfig, storage: S) -> Self {
        Self::with_codec(config, storage, DeflateCodec)
    }
}

impl<S: StorageProvider, C: Codec> NamespacedCache<S, C> {
    /// Creates a cache with a custom compression codec.
    pub fn with_codec(config: CacheConfig, storage: S, codec: C) -> Self {
        Self {
            config,
            storage,
            codec,
        }
    }

    /// Borrows the underlying storage provider.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // == Load ==
    /// Reads the cached payload, if it is both fresh and non-empty.
    ///
    /// Pure read: never writes, and never fails. A missing document, an
    /// entry with no timestamp, a stale timestamp, an empty payload, or
    /// a corrupt compressed blob all read as `None`.
    pub fn load<T: DeserializeOwned>(&self) -> Option<T> {
        let document = self.read_document();

        if self.config.data_key.is_empty() {
            return None;
        }

        let entry = document.entry(&self.config.store_name, &self.config.data_key)?;
        if entry.is_expired(&self.config.expiration) || entry.is_empty() {
            return None;
        }

        // Fresh and non-empty: the payload must be a compressed string.
        // Anything else (e.g. a preserved raw value) reads as a miss.
        let compressed = match &entry.data {
            Some(Value::String(s)) => s,
            _ => return None,
        };

        let json = match self.codec.decompress(compressed) {
            Ok(json) => json,
            Err(err) => {
                debug!("Failed to decompress cached payload, treating as miss: {err}");
                return None;
            }
        };

        safe_parse_json(Some(&json)).and_then(|value| serde_json::from_value(value).ok())
    }

    // == Save ==
    /// Writes the payload under this instance's `(store_name, data_key)`.
    ///
    /// No-op when `storage_key` is empty. An empty payload advances the
    /// entry's timestamp but preserves its previous data, so a stale
    /// value survives an explicit empty save. Sibling entries and store
    /// buckets are carried over unchanged.
    pub fn save<T: Serialize>(&mut self, data: &T) -> Result<()> {
        if self.config.storage_key.is_empty() {
            debug!("No storage key configured, skipping save");
            return Ok(());
        }

        let value = serde_json::to_value(data)?;
        let payload = if is_empty_value(&value) {
            // Null signals "keep whatever was there before"
            Value::Null
        } else {
            Value::String(self.codec.compress(&value.to_string()))
        };

        let mut document = self.read_document();
        document.record(
            &self.config.store_name,
            &self.config.data_key,
            payload,
            Utc::now(),
        );

        self.write_document(&document)
    }

    // == Load Or Fetch ==
    /// Returns the cached payload, or fetches, persists, and returns a
    /// fresh one.
    ///
    /// A cache hit short-circuits without invoking `fetch`. Fetch
    /// failures propagate unchanged; no retry is attempted and nothing
    /// is written. A failed persist after a successful fetch is logged
    /// and the fetched value is still returned.
    pub async fn load_or_fetch<T, E, F, Fut>(&mut self, fetch: F) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if let Some(cached) = self.load() {
            return Ok(cached);
        }

        let data = fetch().await?;

        if let Err(err) = self.save(&data) {
            warn!("Failed to persist fetched payload: {err}");
        }

        Ok(data)
    }

    // == Remove Key ==
    /// Deletes this instance's entry, leaving the rest of the bucket and
    /// document intact. No-op when the entry or bucket is absent.
    pub fn remove_key(&mut self) -> Result<()> {
        let mut document = self.read_document();

        if document.remove_entry(&self.config.store_name, &self.config.data_key) {
            self.write_document(&document)?;
        }

        Ok(())
    }

    // == Clear Store ==
    /// Deletes the whole bucket named `store_name`, across every data
    /// key. Other store buckets are untouched.
    pub fn clear_store(&mut self) -> Result<()> {
        let mut document = self.read_document();
        document.remove_store(&self.config.store_name);

        self.write_document(&document)
    }

    // == Document Plumbing ==
    fn read_document(&self) -> StorageDocument {
        let raw = self.storage.get(&self.config.storage_key);
        StorageDocument::parse(raw.as_deref())
    }

    fn write_document(&mut self, document: &StorageDocument) -> Result<()> {
        let raw = document.to_json()?;
        self.storage.set(&self.config.storage_key, raw);
        Ok(())
    }
}

//! Storage Document Module
//!
//! The single JSON object persisted under one storage key: a mapping
//! from store name to bucket, each bucket mapping data keys to entries.
//! This module is the only reader and writer of the raw stored value.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::cache::entry::{is_empty_value, CacheEntry};
use crate::error::Result;

// == Store Bucket ==
/// All entries for one logical store name, keyed by data key.
pub type StoreBucket = BTreeMap<String, CacheEntry>;

// == Storage Document ==
/// The full namespaced document, keyed by store name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageDocument {
    stores: BTreeMap<String, StoreBucket>,
}

impl StorageDocument {
    // == Parse ==
    /// Parses the raw stored value, treating a missing or malformed
    /// value as an empty document.
    pub fn parse(raw: Option<&str>) -> Self {
        match safe_parse_json(raw) {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
                debug!("Stored document has unexpected shape, starting empty: {err}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    // == Serialize ==
    /// Serializes the document back to its stored JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.stores)?)
    }

    // == Entry Lookup ==
    /// Returns the entry at `(store, key)`, if any.
    pub fn entry(&self, store: &str, key: &str) -> Option<&CacheEntry> {
        self.stores.get(store).and_then(|bucket| bucket.get(key))
    }

    // == Record ==
    /// Writes an entry at `(store, key)` with a fresh timestamp.
    ///
    /// A non-empty `data` value replaces the entry's payload; an empty
    /// one leaves the previous payload in place. Sibling entries and
    /// sibling buckets are untouched. The bucket is created lazily.
    pub fn record(&mut self, store: &str, key: &str, data: Value, now: DateTime<Utc>) {
        let bucket = self.stores.entry(store.to_string()).or_default();
        let previous = bucket.get(key).and_then(|entry| entry.data.clone());

        let data = if is_empty_value(&data) {
            previous
        } else {
            Some(data)
        };

        bucket.insert(
            key.to_string(),
            CacheEntry {
                last_update: Some(now),
                data,
            },
        );
    }

    // == Remove Entry ==
    /// Deletes the entry at `(store, key)`.
    ///
    /// Returns true if an entry was actually removed.
    pub fn remove_entry(&mut self, store: &str, key: &str) -> bool {
        self.stores
            .get_mut(store)
            .map(|bucket| bucket.remove(key).is_some())
            .unwrap_or(false)
    }

    // == Remove Store ==
    /// Deletes the whole bucket named `store`, returning true if it existed.
    pub fn remove_store(&mut self, store: &str) -> bool {
        self.stores.remove(store).is_some()
    }

    // == Is Empty ==
    /// Returns true if no bucket exists.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

// == Safe JSON Parsing ==
/// Lenient JSON parsing: blank or malformed input yields None instead
/// of an error. Parse failures are logged, never raised.
pub fn safe_parse_json(raw: Option<&str>) -> Option<Value> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }

    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!("Failed to parse stored JSON: {err}");
            None
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_missing_is_empty() {
        assert!(StorageDocument::parse(None).is_empty());
    }

    #[test]
    fn test_parse_malformed_is_empty() {
        assert!(StorageDocument::parse(Some("{not json")).is_empty());
        assert!(StorageDocument::parse(Some("   ")).is_empty());
    }

    #[test]
    fn test_record_creates_bucket_lazily() {
        let mut doc = StorageDocument::default();
        doc.record("Store", "key", json!("blob"), Utc::now());

        let entry = doc.entry("Store", "key").unwrap();
        assert_eq!(entry.data, Some(json!("blob")));
        assert!(entry.last_update.is_some());
    }

    #[test]
    fn test_record_preserves_siblings() {
        let now = Utc::now();
        let mut doc = StorageDocument::default();
        doc.record("Store", "a", json!("blob-a"), now);
        doc.record("Store", "b", json!("blob-b"), now);
        doc.record("Other", "c", json!("blob-c"), now);

        doc.record("Store", "a", json!("updated"), now);

        assert_eq!(doc.entry("Store", "a").unwrap().data, Some(json!("updated")));
        assert_eq!(doc.entry("Store", "b").unwrap().data, Some(json!("blob-b")));
        assert_eq!(doc.entry("Other", "c").unwrap().data, Some(json!("blob-c")));
    }

    #[test]
    fn test_record_empty_keeps_previous_payload() {
        let mut doc = StorageDocument::default();
        let first = Utc::now();
        doc.record("Store", "key", json!("blob"), first);

        let second = Utc::now();
        doc.record("Store", "key", json!(""), second);

        let entry = doc.entry("Store", "key").unwrap();
        assert_eq!(entry.data, Some(json!("blob")));
        assert_eq!(entry.last_update, Some(second));
    }

    #[test]
    fn test_record_empty_with_no_prior_leaves_data_unset() {
        let mut doc = StorageDocument::default();
        doc.record("Store", "key", json!({}), Utc::now());

        let entry = doc.entry("Store", "key").unwrap();
        assert!(entry.data.is_none());
        assert!(entry.is_empty());
    }

    #[test]
    fn test_remove_entry_targets_one_key() {
        let now = Utc::now();
        let mut doc = StorageDocument::default();
        doc.record("Store", "a", json!("blob-a"), now);
        doc.record("Store", "b", json!("blob-b"), now);

        assert!(doc.remove_entry("Store", "a"));
        assert!(doc.entry("Store", "a").is_none());
        assert!(doc.entry("Store", "b").is_some());

        // Absent entry or bucket is a no-op
        assert!(!doc.remove_entry("Store", "a"));
        assert!(!doc.remove_entry("Missing", "a"));
    }

    #[test]
    fn test_remove_store_leaves_other_buckets() {
        let now = Utc::now();
        let mut doc = StorageDocument::default();
        doc.record("Store1", "a", json!("blob-a"), now);
        doc.record("Store2", "b", json!("blob-b"), now);

        assert!(doc.remove_store("Store1"));
        assert!(doc.entry("Store1", "a").is_none());
        assert!(doc.entry("Store2", "b").is_some());
    }

    #[test]
    fn test_document_round_trip() {
        let mut doc = StorageDocument::default();
        doc.record("Store", "key", json!("blob"), Utc::now());

        let raw = doc.to_json().unwrap();
        let back = StorageDocument::parse(Some(&raw));

        assert_eq!(back, doc);
    }

    #[test]
    fn test_safe_parse_json_behavior() {
        assert!(safe_parse_json(None).is_none());
        assert!(safe_parse_json(Some("")).is_none());
        assert!(safe_parse_json(Some("  \n ")).is_none());
        assert!(safe_parse_json(Some("{oops")).is_none());
        assert_eq!(safe_parse_json(Some("{\"a\":1}")), Some(json!({"a": 1})));
    }
}

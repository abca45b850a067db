//! Cache Entry Module
//!
//! Defines the `{lastUpdate, data}` record stored for one data key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ExpirationPredicate;

// == Cache Entry ==
/// A single record within a store bucket.
///
/// `data` normally holds the compressed payload string. After an explicit
/// empty save it instead carries whatever value the entry held before, so
/// an empty save never destroys the last known good payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Timestamp of the last write, absent for never-written records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
    /// Compressed payload, or the preserved prior value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl CacheEntry {
    // == Is Expired ==
    /// Checks staleness against the caller's predicate.
    ///
    /// An entry with no recorded `lastUpdate` is unconditionally expired;
    /// otherwise staleness is exactly what the predicate returns.
    pub fn is_expired(&self, expiration: &ExpirationPredicate) -> bool {
        match self.last_update {
            Some(last_update) => expiration(last_update),
            None => true,
        }
    }

    // == Is Empty ==
    /// Checks whether the entry carries no usable payload.
    pub fn is_empty(&self) -> bool {
        match &self.data {
            Some(value) => is_empty_value(value),
            None => true,
        }
    }
}

// == Emptiness Test ==
/// Structural emptiness over the closed set of JSON value kinds.
///
/// Null, whitespace-only strings, empty arrays, and empty objects are
/// empty; numbers and booleans never are.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Number(_) | Value::Bool(_) => false,
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{always_expires, never_expires};
    use serde_json::json;

    fn entry(last_update: Option<DateTime<Utc>>, data: Option<Value>) -> CacheEntry {
        CacheEntry { last_update, data }
    }

    #[test]
    fn test_missing_timestamp_is_expired() {
        let e = entry(None, Some(json!("payload")));

        // Even a never-expiring predicate cannot rescue a timestamp-less entry
        assert!(e.is_expired(&never_expires()));
    }

    #[test]
    fn test_predicate_decides_when_timestamp_present() {
        let e = entry(Some(Utc::now()), Some(json!("payload")));

        assert!(!e.is_expired(&never_expires()));
        assert!(e.is_expired(&always_expires()));
    }

    #[test]
    fn test_entry_without_data_is_empty() {
        assert!(entry(Some(Utc::now()), None).is_empty());
    }

    #[test]
    fn test_is_empty_value_kinds() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!("   \t ")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));

        assert!(!is_empty_value(&json!("x")));
        assert!(!is_empty_value(&json!([0])));
        assert!(!is_empty_value(&json!({"k": 1})));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(false)));
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let e = entry(Some(Utc::now()), Some(json!("blob")));
        let raw = serde_json::to_string(&e).unwrap();

        assert!(raw.contains("lastUpdate"));
        assert!(raw.contains("data"));
    }

    #[test]
    fn test_entry_round_trip() {
        let e = entry(Some(Utc::now()), Some(json!("blob")));
        let raw = serde_json::to_string(&e).unwrap();
        let back: CacheEntry = serde_json::from_str(&raw).unwrap();

        assert_eq!(back, e);
    }
}

//! Local Cache
//!
//! Append-only log of raw records per resource collection, persisted as one
//! JSON array per collection. Records are never inspected or deduplicated.

mod storage;

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

pub use storage::{BrowserStorage, KeyValueStore, MemoryStorage};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CacheError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("local storage error: {0}")]
    Storage(String),
    #[error("failed to encode cached records: {0}")]
    Encode(String),
    #[error("local storage lock poisoned")]
    Poisoned,
}

/// Cacheable resource collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Vehicles,
    Tickets,
    Parcels,
    Receipts,
    Reports,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Vehicles,
        Collection::Tickets,
        Collection::Parcels,
        Collection::Receipts,
        Collection::Reports,
    ];

    /// Resolve from the first segment of a resource path; query strings are
    /// ignored
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segment = path.trim_start_matches('/').split('/').next()?;
        match segment {
            "vehicles" => Some(Collection::Vehicles),
            "tickets" => Some(Collection::Tickets),
            "parcels" => Some(Collection::Parcels),
            "receipts" => Some(Collection::Receipts),
            "reports" => Some(Collection::Reports),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Vehicles => "vehicles",
            Collection::Tickets => "tickets",
            Collection::Parcels => "parcels",
            Collection::Receipts => "receipts",
            Collection::Reports => "reports",
        }
    }

    /// Identifier field carried by records of this collection
    pub fn id_field(&self) -> Option<&'static str> {
        match self {
            Collection::Vehicles => Some("vehicle_id"),
            Collection::Tickets => Some("ticket_id"),
            Collection::Parcels => Some("parcel_id"),
            Collection::Receipts => Some("receipt_id"),
            Collection::Reports => None,
        }
    }

    /// Identifier field returned when a create is queued offline.
    /// Only the three creatable resources have one.
    pub fn created_id_field(&self) -> Option<&'static str> {
        match self {
            Collection::Vehicles | Collection::Tickets | Collection::Parcels => self.id_field(),
            Collection::Receipts | Collection::Reports => None,
        }
    }
}

#[derive(Clone)]
pub struct LocalCache {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl LocalCache {
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn storage_key(&self, collection: Collection) -> String {
        format!("{}{}", self.prefix, collection.as_str())
    }

    /// Append `record` to the collection for `path`. No-op for unmapped paths.
    pub fn save(&self, path: &str, record: Value) -> Result<(), CacheError> {
        match Collection::from_path(path) {
            Some(collection) => self.save_in(collection, record),
            None => Ok(()),
        }
    }

    /// Full sequence for `path`, empty when never written or unmapped
    pub fn load(&self, path: &str) -> Vec<Value> {
        Collection::from_path(path)
            .map(|collection| self.load_from(collection))
            .unwrap_or_default()
    }

    /// Drop every record for `path`. No-op for unmapped paths.
    pub fn clear(&self, path: &str) -> Result<(), CacheError> {
        match Collection::from_path(path) {
            Some(collection) => self.clear_collection(collection),
            None => Ok(()),
        }
    }

    pub fn save_in(&self, collection: Collection, record: Value) -> Result<(), CacheError> {
        let mut records = self.load_from(collection);
        records.push(record);
        let encoded = serde_json::to_string(&records).map_err(|e| CacheError::Encode(e.to_string()))?;
        self.store.set(&self.storage_key(collection), &encoded)?;
        tracing::debug!(collection = collection.as_str(), len = records.len(), "cached record");
        Ok(())
    }

    pub fn load_from(&self, collection: Collection) -> Vec<Value> {
        let key = self.storage_key(collection);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "cache read failed");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "ignoring unreadable cache entry");
                Vec::new()
            }
        }
    }

    pub fn clear_collection(&self, collection: Collection) -> Result<(), CacheError> {
        self.store.remove(&self.storage_key(collection))?;
        tracing::debug!(collection = collection.as_str(), "cleared cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn cache() -> (Arc<MemoryStorage>, LocalCache) {
        let storage = Arc::new(MemoryStorage::new());
        let cache = LocalCache::new(storage.clone(), "transit_");
        (storage, cache)
    }

    #[test]
    fn test_collection_from_path() {
        assert_eq!(Collection::from_path("/vehicles"), Some(Collection::Vehicles));
        assert_eq!(Collection::from_path("vehicles"), Some(Collection::Vehicles));
        assert_eq!(Collection::from_path("/vehicles/v1/occupancy"), Some(Collection::Vehicles));
        assert_eq!(Collection::from_path("/receipts/r1"), Some(Collection::Receipts));
        assert_eq!(Collection::from_path("/reports?x=1"), Some(Collection::Reports));
        assert_eq!(Collection::from_path("/transactions?period=week"), None);
        assert_eq!(Collection::from_path("/"), None);
        assert_eq!(Collection::from_path(""), None);
    }

    #[test]
    fn test_created_id_field_is_fixed() {
        assert_eq!(Collection::Vehicles.created_id_field(), Some("vehicle_id"));
        assert_eq!(Collection::Tickets.created_id_field(), Some("ticket_id"));
        assert_eq!(Collection::Parcels.created_id_field(), Some("parcel_id"));
        assert_eq!(Collection::Receipts.created_id_field(), None);
        assert_eq!(Collection::Reports.created_id_field(), None);
    }

    #[test]
    fn test_save_appends_without_dedup() {
        let (storage, cache) = cache();
        let record = json!({ "vehicle_id": "v1" });
        cache.save("/vehicles", record.clone()).unwrap();
        cache.save("/vehicles", record.clone()).unwrap();

        assert_eq!(cache.load("/vehicles"), vec![record.clone(), record]);
        assert!(storage.peek("transit_vehicles").is_some());
    }

    #[test]
    fn test_load_never_written_is_empty() {
        let (_, cache) = cache();
        assert!(cache.load("/parcels").is_empty());
    }

    #[test]
    fn test_clear_removes_collection_only() {
        let (_, cache) = cache();
        cache.save("/vehicles", json!({ "vehicle_id": "v1" })).unwrap();
        cache.save("/tickets", json!({ "ticket_id": "t1" })).unwrap();

        cache.clear("/vehicles").unwrap();

        assert!(cache.load("/vehicles").is_empty());
        assert_eq!(cache.load("/tickets").len(), 1);
    }

    #[test]
    fn test_corrupt_entry_reads_as_empty_and_is_overwritten() {
        let (storage, cache) = cache();
        storage.set("transit_tickets", "{not json").unwrap();

        assert!(cache.load("/tickets").is_empty());

        cache.save("/tickets", json!({ "ticket_id": "t1" })).unwrap();
        assert_eq!(cache.load("/tickets"), vec![json!({ "ticket_id": "t1" })]);
    }

    #[test]
    fn test_unmapped_paths_are_noops() {
        let (storage, cache) = cache();
        cache.save("/transactions", json!({ "total": 1 })).unwrap();
        cache.clear("/transactions").unwrap();

        assert!(cache.load("/transactions").is_empty());
        assert_eq!(storage.read_count(), 0);
    }

    fn mapped_path() -> impl Strategy<Value = String> {
        (
            prop::sample::select(vec!["vehicles", "tickets", "parcels", "receipts", "reports"]),
            prop::option::of("[a-z0-9]{1,6}"),
        )
            .prop_map(|(collection, tail)| match tail {
                Some(tail) => format!("/{}/{}", collection, tail),
                None => format!("/{}", collection),
            })
    }

    proptest! {
        #[test]
        fn prop_save_then_load_ends_with_record(path in mapped_path(), n in any::<i64>(), prior in 0usize..4) {
            let (_, cache) = cache();
            for i in 0..prior {
                cache.save(&path, json!({ "prior": i })).unwrap();
            }
            let record = json!({ "n": n });
            cache.save(&path, record.clone()).unwrap();

            let loaded = cache.load(&path);
            prop_assert_eq!(loaded.len(), prior + 1);
            prop_assert_eq!(loaded.last(), Some(&record));
        }

        #[test]
        fn prop_unmapped_save_load_noop(segment in "[a-z]{1,10}", n in any::<i64>()) {
            prop_assume!(Collection::from_path(&segment).is_none());
            let (_, cache) = cache();
            let path = format!("/{}", segment);
            cache.save(&path, json!({ "n": n })).unwrap();
            prop_assert!(cache.load(&path).is_empty());
        }
    }
}

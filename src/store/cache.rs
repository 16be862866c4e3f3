//! # Dataset Cache
//!
//! Session cache for fetched key sets and records. Key sets are cached whole
//! and sliced per page, so changing page or filter stays local until the
//! cache is invalidated.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use paths::prelude::Schema;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DatasetKey {
    schema: Schema,
    mount_path: String,
    id_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RecordKey {
    schema: Schema,
    mount_path: String,
    id: String,
}

/// Cached key sets and records
#[derive(Debug, Default)]
pub struct DatasetCache {
    datasets: Mutex<HashMap<DatasetKey, Arc<Vec<String>>>>,
    records: Mutex<HashMap<RecordKey, serde_json::Value>>,
}

// Every write is a single map call, so a poisoned map is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset(&self, schema: Schema, mount_path: &str, id_prefix: &str) -> Option<Arc<Vec<String>>> {
        let key = DatasetKey {
            schema,
            mount_path: mount_path.to_string(),
            id_prefix: id_prefix.to_string(),
        };
        lock(&self.datasets).get(&key).cloned()
    }

    pub fn store_dataset(
        &self,
        schema: Schema,
        mount_path: &str,
        id_prefix: &str,
        keys: Vec<String>,
    ) -> Arc<Vec<String>> {
        let keys = Arc::new(keys);
        let key = DatasetKey {
            schema,
            mount_path: mount_path.to_string(),
            id_prefix: id_prefix.to_string(),
        };
        lock(&self.datasets).insert(key, Arc::clone(&keys));
        keys
    }

    pub fn record(&self, schema: Schema, mount_path: &str, id: &str) -> Option<serde_json::Value> {
        lock(&self.records).get(&record_key(schema, mount_path, id)).cloned()
    }

    pub fn store_record(&self, schema: Schema, mount_path: &str, id: &str, data: serde_json::Value) {
        lock(&self.records).insert(record_key(schema, mount_path, id), data);
    }

    pub fn remove_record(&self, schema: Schema, mount_path: &str, id: &str) -> bool {
        lock(&self.records)
            .remove(&record_key(schema, mount_path, id))
            .is_some()
    }

    /// Number of cached key sets plus records
    pub fn len(&self) -> usize {
        lock(&self.datasets).len() + lock(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        lock(&self.datasets).clear();
        lock(&self.records).clear();
    }
}

fn record_key(schema: Schema, mount_path: &str, id: &str) -> RecordKey {
    RecordKey {
        schema,
        mount_path: mount_path.to_string(),
        id: id.to_string(),
    }
}

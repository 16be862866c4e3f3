//! Common test utilities
//!
//! Rustls setup for the Pact tests and an in-memory [`SecretStore`] for
//! driving the lister, the prefetcher and the navigation controller.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use secret_browser::paths::prelude::{KvVersion, Schema};
use secret_browser::store::{paginate, ListQuery, ListingPage, RecordQuery, SecretStore};
use secret_browser::{BackendMount, StoreError};

static RUSTLS_INIT: Once = Once::new();

/// Initialize rustls crypto provider for tests
///
/// Uses a `Once` so it is installed a single time across all tests.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        rustls::crypto::ring::default_provider()
            .install_default()
            .expect("Failed to install rustls crypto provider");
    });
}

/// Canned listing response
#[derive(Debug, Clone)]
pub enum FakeListing {
    Keys(Vec<String>),
    Status(u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ListingKey {
    schema: Schema,
    mount_path: String,
    prefix: String,
}

/// In-memory store with canned responses
///
/// Unknown listings and records answer 404.
#[derive(Debug, Default)]
pub struct FakeStore {
    listings: Mutex<HashMap<ListingKey, FakeListing>>,
    records: Mutex<HashMap<String, Result<serde_json::Value, u16>>>,
    mounts: Mutex<HashMap<String, BackendMount>>,
    delays: Mutex<HashMap<String, Duration>>,
    list_calls: AtomicUsize,
    invalidations: AtomicUsize,
    unloaded: Mutex<Vec<String>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mount(self, path: &str, engine_type: &str, kv_version: Option<KvVersion>) -> Self {
        let mount = BackendMount::new(path, engine_type, kv_version);
        self.mounts.lock().unwrap().insert(mount.path.clone(), mount);
        self
    }

    pub fn with_keys(self, schema: Schema, mount_path: &str, prefix: &str, keys: &[&str]) -> Self {
        let keys = keys.iter().map(|k| (*k).to_string()).collect();
        self.set_listing(schema, mount_path, prefix, FakeListing::Keys(keys));
        self
    }

    pub fn with_status(self, schema: Schema, mount_path: &str, prefix: &str, status: u16) -> Self {
        self.set_listing(schema, mount_path, prefix, FakeListing::Status(status));
        self
    }

    pub fn with_record(self, id: &str, data: serde_json::Value) -> Self {
        self.records.lock().unwrap().insert(id.to_string(), Ok(data));
        self
    }

    pub fn with_record_status(self, id: &str, status: u16) -> Self {
        self.records.lock().unwrap().insert(id.to_string(), Err(status));
        self
    }

    /// Delay listings of `prefix` by `delay`
    pub fn with_delay(self, prefix: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(prefix.to_string(), delay);
        self
    }

    pub fn set_listing(&self, schema: Schema, mount_path: &str, prefix: &str, listing: FakeListing) {
        let key = ListingKey {
            schema,
            mount_path: mount_path.to_string(),
            prefix: prefix.to_string(),
        };
        self.listings.lock().unwrap().insert(key, listing);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }

    pub fn unloaded(&self) -> Vec<String> {
        self.unloaded.lock().unwrap().clone()
    }
}

fn api_error(status: u16) -> StoreError {
    StoreError::Api {
        status,
        errors: vec![format!("status {status}")],
    }
}

#[async_trait]
impl SecretStore for FakeStore {
    async fn list_query(
        &self,
        schema: Schema,
        query: &ListQuery,
    ) -> Result<ListingPage, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let delay = self.delays.lock().unwrap().get(&query.id_prefix).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let key = ListingKey {
            schema,
            mount_path: query.mount_path.clone(),
            prefix: query.id_prefix.clone(),
        };
        let listing = self.listings.lock().unwrap().get(&key).cloned();
        match listing {
            Some(FakeListing::Keys(keys)) => Ok(paginate(
                &keys,
                query.filter.as_deref(),
                query.page,
                query.page_size,
            )),
            Some(FakeListing::Status(status)) => Err(api_error(status)),
            None => Err(api_error(404)),
        }
    }

    async fn query_record(
        &self,
        _schema: Schema,
        query: &RecordQuery,
    ) -> Result<serde_json::Value, StoreError> {
        let record = self.records.lock().unwrap().get(&query.id).cloned();
        match record {
            Some(Ok(data)) => Ok(data),
            Some(Err(status)) => Err(api_error(status)),
            None => Err(api_error(404)),
        }
    }

    fn unload_record(&self, _schema: Schema, query: &RecordQuery) {
        self.unloaded.lock().unwrap().push(query.id.clone());
    }

    fn invalidate_all(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
    }

    fn peek_cached_mount(&self, mount_path: &str) -> Option<BackendMount> {
        self.mounts
            .lock()
            .unwrap()
            .get(mount_path.trim_matches('/'))
            .cloned()
    }
}

/// Keys `key-00` .. `key-{n-1}`
pub fn numbered_keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("key-{i:02}")).collect()
}

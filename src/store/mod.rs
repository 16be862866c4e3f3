//! # Store
//!
//! The data-fetch collaborator the browser lists and reads through.
//!
//! [`SecretStore`] is the seam: the lister, the prefetcher and the
//! navigation controller only talk to the trait. [`VaultStore`] is the HTTP
//! implementation, backed by a [`DatasetCache`] so that page and filter
//! changes on the same listing do not refetch the key set.

use async_trait::async_trait;
use paths::prelude::Schema;

use crate::error::StoreError;
use crate::mount::BackendMount;

pub mod cache;
pub mod page;
pub mod vault;

pub use cache::DatasetCache;
pub use page::{paginate, ListingPage, PageMeta};
pub use vault::VaultStore;

/// Parameters of a paginated listing query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Prefix under the mount, empty at the root
    pub id_prefix: String,
    pub mount_path: String,
    /// 1-based page number
    pub page: usize,
    pub filter: Option<String>,
    /// Dotted path of the keys array in the response body
    pub response_path: String,
    pub page_size: usize,
}

/// Parameters of a single-record read
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordQuery {
    pub id: String,
    pub mount_path: String,
}

/// Data-fetch collaborator
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// List keys for `schema` and return the requested page
    async fn list_query(&self, schema: Schema, query: &ListQuery)
        -> Result<ListingPage, StoreError>;

    /// Read one record; returns the response's `data` object
    async fn query_record(
        &self,
        schema: Schema,
        query: &RecordQuery,
    ) -> Result<serde_json::Value, StoreError>;

    /// Drop a cached record
    fn unload_record(&self, schema: Schema, query: &RecordQuery);

    /// Drop every cached listing and record. Safe to call repeatedly.
    fn invalidate_all(&self);

    /// Mount metadata already loaded this session, if any
    fn peek_cached_mount(&self, mount_path: &str) -> Option<BackendMount>;
}

//! # Store Operations
//!
//! Implementation of [`SecretStore`] for the REST client.

use std::time::Instant;

use async_trait::async_trait;
use paths::prelude::{Operation, PathBuilder, Schema};
use reqwest::Method;
use tracing::{debug, debug_span, Instrument};

use super::responses::extract_field;
use super::VaultStore;
use crate::error::StoreError;
use crate::mount::{normalize_mount_path, BackendMount};
use crate::store::page::{paginate, ListingPage};
use crate::store::{ListQuery, RecordQuery, SecretStore};

impl VaultStore {
    /// Fetch the full key set for a listing, bypassing the cache
    async fn fetch_keys(&self, schema: Schema, query: &ListQuery) -> Result<Vec<String>, StoreError> {
        let path = PathBuilder::new()
            .schema(schema)
            .operation(Operation::List)
            .mount(&query.mount_path)
            .prefix(&query.id_prefix)
            .build_http_path()?;

        let response = self
            .make_request(Method::GET, &path)
            .query(&[("list", "true")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(format!("list response for {path}: {e}")))?;

        let keys = extract_field(&body, &query.response_path)
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| StoreError::MissingField(query.response_path.clone()))?;

        Ok(keys
            .iter()
            .filter_map(|key| key.as_str().map(str::to_string))
            .collect())
    }
}

#[async_trait]
impl SecretStore for VaultStore {
    async fn list_query(
        &self,
        schema: Schema,
        query: &ListQuery,
    ) -> Result<ListingPage, StoreError> {
        let span = debug_span!(
            "store.list",
            schema = schema.id(),
            mount.path = %query.mount_path,
            secret.prefix = %query.id_prefix,
            page = query.page
        );

        async move {
            let start = Instant::now();
            let mount_path = normalize_mount_path(&query.mount_path);

            let keys = match self.cache().dataset(schema, &mount_path, &query.id_prefix) {
                Some(keys) => {
                    debug!("Using cached key set ({} keys)", keys.len());
                    keys
                }
                None => {
                    let keys = self.fetch_keys(schema, query).await?;
                    debug!(
                        "Fetched {} keys in {}ms",
                        keys.len(),
                        start.elapsed().as_millis()
                    );
                    self.cache()
                        .store_dataset(schema, &mount_path, &query.id_prefix, keys)
                }
            };

            Ok(paginate(
                &keys,
                query.filter.as_deref(),
                query.page,
                query.page_size,
            ))
        }
        .instrument(span)
        .await
    }

    async fn query_record(
        &self,
        schema: Schema,
        query: &RecordQuery,
    ) -> Result<serde_json::Value, StoreError> {
        let mount_path = normalize_mount_path(&query.mount_path);
        if let Some(data) = self.cache().record(schema, &mount_path, &query.id) {
            return Ok(data);
        }

        let path = PathBuilder::new()
            .schema(schema)
            .operation(Operation::Read)
            .mount(&mount_path)
            .id(&query.id)
            .build_http_path()?;

        let response = self.make_request(Method::GET, &path).send().await?;
        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(format!("record {path}: {e}")))?;
        let data = extract_field(&body, "data")
            .cloned()
            .ok_or_else(|| StoreError::MissingField("data".to_string()))?;

        self.cache()
            .store_record(schema, &mount_path, &query.id, data.clone());
        Ok(data)
    }

    fn unload_record(&self, schema: Schema, query: &RecordQuery) {
        let mount_path = normalize_mount_path(&query.mount_path);
        if self.cache().remove_record(schema, &mount_path, &query.id) {
            debug!("Unloaded {} record {} on {}", schema, query.id, mount_path);
        }
    }

    fn invalidate_all(&self) {
        self.cache().clear();
    }

    fn peek_cached_mount(&self, mount_path: &str) -> Option<BackendMount> {
        self.mounts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&normalize_mount_path(mount_path))
            .cloned()
    }
}

//! Secrets API REST Client
//!
//! Native REST implementation of [`SecretStore`](crate::store::SecretStore)
//! against the `/v1/` HTTP API. Uses reqwest with rustls.
//!
//! - Listing uses `GET <path>?list=true` and reads `data.keys`
//! - Mount metadata comes from `sys/internal/ui/mounts/<mount>`
//! - 404 and 403 are returned as [`StoreError::Api`] so callers can classify them

mod operations;
mod responses;

pub use responses::{extract_field, ErrorResponse, MountData, MountOptions, MountResponse};

use std::collections::HashMap;
use std::sync::Mutex;

use paths::prelude::{KvVersion, Operation, PathBuilder};
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::config::BrowserConfig;
use crate::constants::{NAMESPACE_HEADER, TOKEN_HEADER};
use crate::error::StoreError;
use crate::mount::{normalize_mount_path, BackendMount};
use crate::store::cache::DatasetCache;

/// REST client for the secrets API
pub struct VaultStore {
    http_client: Client,
    base_url: String,
    token: Option<Zeroizing<String>>,
    namespace: Option<String>,
    cache: DatasetCache,
    mounts: Mutex<HashMap<String, BackendMount>>,
}

impl std::fmt::Debug for VaultStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultStore")
            .field("base_url", &self.base_url)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl VaultStore {
    /// Create a new client from configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &BrowserConfig) -> Result<Self, StoreError> {
        let http_client = Client::builder().timeout(config.request_timeout()).build()?;

        info!("Initializing secrets API client for {}", config.vault_addr);

        Ok(Self {
            http_client,
            base_url: config.vault_addr.trim_end_matches('/').to_string(),
            token: config.vault_token.clone(),
            namespace: config.vault_namespace.clone(),
            cache: DatasetCache::new(),
            mounts: Mutex::new(HashMap::new()),
        })
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// Build an HTTP request with authentication headers
    ///
    /// `path` is relative to `/v1/`.
    pub(crate) fn make_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/v1/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self.http_client.request(method, &url);

        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token.as_str());
        }
        if let Some(namespace) = &self.namespace {
            request = request.header(NAMESPACE_HEADER, namespace);
        }

        request
    }

    /// Convert a non-success response into [`StoreError::Api`]
    pub(crate) async fn handle_error_response(response: Response) -> StoreError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let errors = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.errors)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    Vec::new()
                } else {
                    vec![body.trim().to_string()]
                }
            });
        debug!("API error response: status={}, errors={:?}", status, errors);
        StoreError::Api { status, errors }
    }

    /// Load mount metadata from the server and cache it for the session
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be decoded
    pub async fn load_mount(&self, mount_path: &str) -> Result<BackendMount, StoreError> {
        let mount_path = normalize_mount_path(mount_path);
        let path = PathBuilder::new()
            .operation(Operation::MountMetadata)
            .mount(&mount_path)
            .build_http_path()?;

        let response = self.make_request(Method::GET, &path).send().await?;
        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        let body: MountResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(format!("mount metadata for {mount_path}: {e}")))?;

        let version = body.data.options.as_ref().and_then(|o| o.version.as_deref());
        let mount = BackendMount::new(
            mount_path,
            body.data.engine_type,
            KvVersion::from_option(version),
        );
        info!(
            "Loaded mount {} (type={}, v2={})",
            mount.path,
            mount.engine_type,
            mount.is_v2()
        );
        self.insert_mount(mount.clone());
        Ok(mount)
    }

    /// Seed the mount cache with already-known metadata
    pub fn insert_mount(&self, mount: BackendMount) {
        self.mounts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(mount.path.clone(), mount);
    }
}

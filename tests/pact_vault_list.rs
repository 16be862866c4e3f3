//! Pact contract tests for the secrets HTTP API
//!
//! These tests define the contract between the secret browser and the
//! `/v1/` API: LIST requests, single-record reads and mount metadata.

mod common;

use std::sync::Arc;

use common::init_rustls;
use pact_consumer::prelude::*;
use secret_browser::paths::prelude::{KvVersion, Schema};
use secret_browser::store::{ListQuery, RecordQuery, SecretStore};
use secret_browser::{
    BackendMount, BrowserConfig, NavigationController, NavigationResult, RouteParams, Transition,
    VaultStore,
};
use serde_json::json;
use zeroize::Zeroizing;

fn store_for(mock_url: impl std::fmt::Display) -> VaultStore {
    // mock_server.url() ends with a slash
    let mut base_url = mock_url.to_string();
    if base_url.ends_with('/') {
        base_url.pop();
    }
    let config = BrowserConfig {
        vault_addr: base_url,
        vault_token: Some(Zeroizing::new("test-token".to_string())),
        ..BrowserConfig::default()
    };
    VaultStore::new(&config).expect("Failed to create store")
}

fn list_query(mount_path: &str, prefix: &str) -> ListQuery {
    ListQuery {
        id_prefix: prefix.to_string(),
        mount_path: mount_path.to_string(),
        page: 1,
        filter: None,
        response_path: "data.keys".to_string(),
        page_size: 15,
    }
}

#[tokio::test]
async fn test_list_kv2_metadata_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new("Secret-Browser", "Secrets-API");

    pact_builder.interaction("list keys under a kv v2 prefix", "", |mut i| {
        i.given("kv v2 mount 'secret' has keys under app/");
        i.request
            .method("GET")
            .path("/v1/secret/metadata/app/".to_string())
            .query_param("list", "true")
            .header("X-Vault-Token", "test-token");
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "data": {
                    "keys": ["api/", "db", "cache"]
                }
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let store = store_for(mock_server.url());

    let page = store
        .list_query(Schema::SecretV2, &list_query("secret", "app/"))
        .await
        .expect("Listing failed");
    assert_eq!(page.keys, vec!["api/", "db", "cache"]);
    assert_eq!(page.meta.total, 3);

    // Second page of the same listing comes from the cache
    let mut query = list_query("secret", "app/");
    query.filter = Some("DB".to_string());
    let page = store
        .list_query(Schema::SecretV2, &query)
        .await
        .expect("Cached listing failed");
    assert_eq!(page.keys, vec!["db"]);
}

#[tokio::test]
async fn test_list_forbidden_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new("Secret-Browser", "Secrets-API");

    pact_builder.interaction("list the root of a kv v2 mount without permission", "", |mut i| {
        i.given("the token may not list kv2-store");
        i.request
            .method("GET")
            .path("/v1/kv2-store/metadata/".to_string())
            .query_param("list", "true");
        i.response
            .status(403)
            .header("content-type", "application/json")
            .json_body(json!({ "errors": ["permission denied"] }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let store = Arc::new(store_for(mock_server.url()));
    store.insert_mount(BackendMount::new("kv2-store", "kv", Some(KvVersion::V2)));

    let controller = NavigationController::new(store);
    let result = controller
        .navigate(Transition::new(RouteParams::root("kv2-store")))
        .await
        .expect("Navigation failed");

    match result {
        NavigationResult::Settled(view) => {
            assert!(view.items.is_empty());
            assert!(view.has_no_permissions_at_root);
        }
        other => panic!("expected settled view, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_not_found_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new("Secret-Browser", "Secrets-API");

    pact_builder.interaction("list a prefix that does not exist", "", |mut i| {
        i.given("kv v1 mount 'secret' has no keys under missing/");
        i.request
            .method("GET")
            .path("/v1/secret/missing/".to_string())
            .query_param("list", "true");
        i.response
            .status(404)
            .header("content-type", "application/json")
            .json_body(json!({ "errors": [] }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let store = store_for(mock_server.url());

    let err = store
        .list_query(Schema::Secret, &list_query("secret", "missing/"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_read_certificate_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new("Secret-Browser", "Secrets-API");

    pact_builder.interaction("read the CA certificate of a pki mount", "", |mut i| {
        i.given("pki mount 'pki' has a root CA");
        i.request
            .method("GET")
            .path("/v1/pki/cert/ca".to_string())
            .header("X-Vault-Token", "test-token");
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "data": {
                    "certificate": "-----BEGIN CERTIFICATE-----\nMIIB...\n-----END CERTIFICATE-----",
                    "revocation_time": 0
                }
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let store = store_for(mock_server.url());

    let query = RecordQuery {
        id: "ca".to_string(),
        mount_path: "pki".to_string(),
    };
    let data = store
        .query_record(Schema::PkiCert, &query)
        .await
        .expect("Read failed");
    assert!(data["certificate"]
        .as_str()
        .is_some_and(|c| c.starts_with("-----BEGIN CERTIFICATE-----")));

    // Cached after the first read
    assert!(store.cache().record(Schema::PkiCert, "pki", "ca").is_some());
    store.unload_record(Schema::PkiCert, &query);
    assert!(store.cache().record(Schema::PkiCert, "pki", "ca").is_none());
}

#[tokio::test]
async fn test_mount_metadata_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new("Secret-Browser", "Secrets-API");

    pact_builder.interaction("read mount metadata of a kv v2 mount", "", |mut i| {
        i.given("kv v2 mount 'kv2-store' exists");
        i.request
            .method("GET")
            .path("/v1/sys/internal/ui/mounts/kv2-store".to_string())
            .header("X-Vault-Token", "test-token");
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "data": {
                    "type": "kv",
                    "path": "kv2-store/",
                    "options": { "version": "2" }
                }
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let store = store_for(mock_server.url());

    let mount = store.load_mount("kv2-store/").await.expect("Mount load failed");
    assert_eq!(mount.path, "kv2-store");
    assert_eq!(mount.engine_type, "kv");
    assert!(mount.is_v2());

    store.invalidate_all();
    assert_eq!(store.peek_cached_mount("kv2-store"), Some(mount));
}

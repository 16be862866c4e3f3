//! Certificate prefetch tests

mod common;

use common::FakeStore;
use secret_browser::prefetch::prefetch_certificates;
use secret_browser::CertId;
use serde_json::json;

#[tokio::test]
async fn test_failed_fetch_is_dropped_and_others_kept() {
    let store = FakeStore::new()
        .with_record("ca", json!({ "certificate": "CA-PEM" }))
        .with_record_status("crl", 500)
        .with_record("ca_chain", json!({ "certificate": "CHAIN-PEM" }));

    let records = prefetch_certificates(&store, "pki").await;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, CertId::Ca);
    assert_eq!(records[0].certificate, "CA-PEM");
    assert_eq!(records[1].id, CertId::CaChain);
    assert_eq!(store.unloaded(), vec!["crl".to_string()]);
}

#[tokio::test]
async fn test_records_without_certificate_are_unloaded() {
    let store = FakeStore::new()
        .with_record("ca", json!({ "certificate": "" }))
        .with_record("crl", json!({ "expiry": "72h" }))
        .with_record("ca_chain", json!({ "certificate": "CHAIN-PEM" }));

    let records = prefetch_certificates(&store, "pki").await;

    let ids: Vec<CertId> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![CertId::CaChain]);
    assert_eq!(store.unloaded(), vec!["ca".to_string(), "crl".to_string()]);
}

#[tokio::test]
async fn test_nothing_available_yields_no_records() {
    let store = FakeStore::new();

    let records = prefetch_certificates(&store, "pki").await;

    assert!(records.is_empty());
    assert_eq!(store.unloaded().len(), 3);
}

//! # Certificate Prefetch
//!
//! PKI mounts may expose `ca`, `crl` and `ca_chain` as readable records.
//! None of them is guaranteed to exist, so each is fetched independently and
//! dropped when it fails or carries no certificate.

use futures::future::join_all;
use paths::prelude::Schema;
use serde::Serialize;
use tracing::{debug, info};

use crate::constants::CERTIFICATE_FIELD;
use crate::observability::metrics;
use crate::store::{RecordQuery, SecretStore};

/// Well-known certificate record identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CertId {
    Ca,
    Crl,
    CaChain,
}

impl CertId {
    pub const ALL: [CertId; 3] = [CertId::Ca, CertId::Crl, CertId::CaChain];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CertId::Ca => "ca",
            CertId::Crl => "crl",
            CertId::CaChain => "ca_chain",
        }
    }
}

impl std::fmt::Display for CertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Certificate record kept after prefetch; `certificate` is never empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuxCertRecord {
    pub id: CertId,
    pub certificate: String,
}

/// Fetch `ca`, `crl` and `ca_chain` concurrently
///
/// Never fails. Records that failed or lack a certificate are unloaded from
/// the store and left out of the result, which keeps [`CertId::ALL`] order.
pub async fn prefetch_certificates<S>(store: &S, mount_path: &str) -> Vec<AuxCertRecord>
where
    S: SecretStore + ?Sized,
{
    let fetches = CertId::ALL.into_iter().map(|id| async move {
        let query = RecordQuery {
            id: id.as_str().to_string(),
            mount_path: mount_path.to_string(),
        };
        let result = store.query_record(Schema::PkiCert, &query).await;
        (id, query, result)
    });

    let mut records = Vec::with_capacity(CertId::ALL.len());
    for (id, query, result) in join_all(fetches).await {
        let certificate = match result {
            Ok(data) => data
                .get(CERTIFICATE_FIELD)
                .and_then(serde_json::Value::as_str)
                .filter(|cert| !cert.is_empty())
                .map(str::to_string)
                .ok_or("missing"),
            Err(err) => {
                debug!("Prefetch of {} on {} failed: {}", id, mount_path, err);
                Err("error")
            }
        };

        match certificate {
            Ok(certificate) => {
                metrics::record_certificate_prefetch("kept");
                records.push(AuxCertRecord { id, certificate });
            }
            Err(result) => {
                metrics::record_certificate_prefetch(result);
                store.unload_record(Schema::PkiCert, &query);
            }
        }
    }

    info!(
        "Prefetched {}/{} certificate records on {}",
        records.len(),
        CertId::ALL.len(),
        mount_path
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cert_ids() {
        let ids: Vec<&str> = CertId::ALL.iter().map(CertId::as_str).collect();
        assert_eq!(ids, vec!["ca", "crl", "ca_chain"]);
    }

    #[test]
    fn test_aux_record_serializes_snake_case_id() {
        let record = AuxCertRecord {
            id: CertId::CaChain,
            certificate: "-----BEGIN CERTIFICATE-----".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "ca_chain");
    }
}

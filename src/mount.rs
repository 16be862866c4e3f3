//! # Backend Mounts
//!
//! A mounted secret engine as reported by the server's mount metadata.

use paths::prelude::{EngineType, KvVersion};
use serde::Serialize;

/// Mounted secret engine instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendMount {
    /// Mount point, without surrounding slashes
    pub path: String,
    /// Engine type exactly as reported; may be one the browser cannot list
    pub engine_type: String,
    /// Only meaningful for KV-like engines
    #[serde(skip)]
    pub kv_version: Option<KvVersion>,
}

impl BackendMount {
    pub fn new(
        path: impl Into<String>,
        engine_type: impl Into<String>,
        kv_version: Option<KvVersion>,
    ) -> Self {
        Self {
            path: normalize_mount_path(&path.into()),
            engine_type: engine_type.into(),
            kv_version,
        }
    }

    /// Parsed engine type, `None` when the browser has no list view for it
    #[must_use]
    pub fn engine(&self) -> Option<EngineType> {
        self.engine_type.parse().ok()
    }

    #[must_use]
    pub fn is_v2(&self) -> bool {
        self.kv_version == Some(KvVersion::V2)
    }
}

/// Mount paths are compared without surrounding slashes
#[must_use]
pub fn normalize_mount_path(path: &str) -> String {
    path.trim_matches('/').to_string()
}

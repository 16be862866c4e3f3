//! Backend type registry
//!
//! The engine type reported by mount metadata is an opaque string. Only the
//! types below have a list view; everything else (including engines such as
//! `kmip` that ship their own dedicated views) is unsupported and the caller
//! must send the user back to the secrets landing view.

use std::fmt;
use std::str::FromStr;

use crate::errors::PathBuilderError;

/// Secret engine types the browser can list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineType {
    Aws,
    Cubbyhole,
    Database,
    Generic,
    Keymgmt,
    Kv,
    Pki,
    Ssh,
    Transform,
    Transit,
}

impl EngineType {
    /// Every supported engine type, in display order
    pub const ALL: [EngineType; 10] = [
        EngineType::Aws,
        EngineType::Cubbyhole,
        EngineType::Database,
        EngineType::Generic,
        EngineType::Keymgmt,
        EngineType::Kv,
        EngineType::Pki,
        EngineType::Ssh,
        EngineType::Transform,
        EngineType::Transit,
    ];

    /// Identifier as reported by the server
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineType::Aws => "aws",
            EngineType::Cubbyhole => "cubbyhole",
            EngineType::Database => "database",
            EngineType::Generic => "generic",
            EngineType::Keymgmt => "keymgmt",
            EngineType::Kv => "kv",
            EngineType::Pki => "pki",
            EngineType::Ssh => "ssh",
            EngineType::Transform => "transform",
            EngineType::Transit => "transit",
        }
    }

    /// KV-like engines need the mount's version flag to pick a schema
    #[must_use]
    pub fn is_kv_like(&self) -> bool {
        matches!(self, EngineType::Kv | EngineType::Generic)
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineType {
    type Err = PathBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EngineType::ALL
            .into_iter()
            .find(|engine| engine.as_str() == s)
            .ok_or_else(|| PathBuilderError::UnsupportedEngineType(s.to_string()))
    }
}

/// Whether the browser has a list view for the reported engine type
#[must_use]
pub fn is_supported(engine_type: &str) -> bool {
    engine_type.parse::<EngineType>().is_ok()
}

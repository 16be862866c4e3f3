//! Model resolver
//!
//! Maps (engine type, tab, KV version) to the schema a listing is made
//! against. Pure: the same inputs always give the same spec.

use crate::engine::EngineType;
use crate::errors::PathBuilderError;
use crate::schema::Schema;

/// KV engine version, read from the mount's `options.version`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KvVersion {
    V1,
    V2,
}

impl KvVersion {
    /// Parse the `options.version` value reported for a mount
    ///
    /// A missing or empty option means version 1.
    #[must_use]
    pub fn from_option(version: Option<&str>) -> Option<KvVersion> {
        match version.map(str::trim) {
            None | Some("" | "1") => Some(KvVersion::V1),
            Some("2") => Some(KvVersion::V2),
            Some(_) => None,
        }
    }
}

/// Resolved schema and its list path template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourcePathSpec {
    pub schema: Schema,
    pub path_template: &'static str,
}

impl From<Schema> for ResourcePathSpec {
    fn from(schema: Schema) -> Self {
        Self {
            schema,
            path_template: schema.list_template(),
        }
    }
}

/// Resolve the resource schema for a mount and tab
///
/// Unknown tabs fall back to the engine's default schema. KV-like engines
/// return [`PathBuilderError::KvVersionUnknown`] until the version is known;
/// v1 and v2 paths are incompatible so there is no default.
pub fn resolve(
    engine: EngineType,
    tab: Option<&str>,
    kv_version: Option<KvVersion>,
) -> Result<ResourcePathSpec, PathBuilderError> {
    let schema = match engine {
        EngineType::Database => match tab {
            Some("role") => Schema::DatabaseRole,
            _ => Schema::DatabaseConnection,
        },
        EngineType::Transit => Schema::TransitKey,
        EngineType::Ssh => Schema::SshRole,
        EngineType::Transform => match tab {
            Some("role") => Schema::TransformRole,
            Some("template") => Schema::TransformTemplate,
            Some("alphabet") => Schema::TransformAlphabet,
            _ => Schema::Transformation,
        },
        EngineType::Aws => Schema::AwsRole,
        EngineType::Pki => match tab {
            Some("cert" | "certificate") => Schema::PkiCert,
            _ => Schema::PkiRole,
        },
        EngineType::Cubbyhole => Schema::Secret,
        EngineType::Kv | EngineType::Generic => match kv_version {
            Some(KvVersion::V2) => Schema::SecretV2,
            Some(KvVersion::V1) => Schema::Secret,
            None => return Err(PathBuilderError::KvVersionUnknown(engine.to_string())),
        },
        EngineType::Keymgmt => match tab {
            Some("provider") => Schema::KeymgmtProvider,
            _ => Schema::KeymgmtKey,
        },
    };

    Ok(schema.into())
}

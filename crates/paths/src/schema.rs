//! Resource schemas
//!
//! A schema is the resource shape a list or read is made against. Each one
//! carries its own list and read path templates, relative to `/v1/`.

use std::fmt;

/// Placeholder for the mount path in templates
pub const MOUNT_PLACEHOLDER: &str = "{mount}";
/// Placeholder for the listing prefix in templates
pub const PREFIX_PLACEHOLDER: &str = "{prefix}";
/// Placeholder for a record id in templates
pub const ID_PLACEHOLDER: &str = "{id}";

/// Concrete resource schema a mount + tab resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schema {
    DatabaseConnection,
    DatabaseRole,
    TransitKey,
    SshRole,
    Transformation,
    TransformRole,
    TransformTemplate,
    TransformAlphabet,
    AwsRole,
    PkiRole,
    PkiCert,
    /// Flat KV v1 / cubbyhole secret
    Secret,
    /// Versioned KV v2 metadata
    SecretV2,
    KeymgmtKey,
    KeymgmtProvider,
}

impl Schema {
    /// Schema identifier, stable across releases
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Schema::DatabaseConnection => "database/connection",
            Schema::DatabaseRole => "database/role",
            Schema::TransitKey => "transit-key",
            Schema::SshRole => "role-ssh",
            Schema::Transformation => "transform",
            Schema::TransformRole => "transform/role",
            Schema::TransformTemplate => "transform/template",
            Schema::TransformAlphabet => "transform/alphabet",
            Schema::AwsRole => "role-aws",
            Schema::PkiRole => "pki/pki-role",
            Schema::PkiCert => "pki/cert",
            Schema::Secret => "secret",
            Schema::SecretV2 => "secret-v2",
            Schema::KeymgmtKey => "keymgmt/key",
            Schema::KeymgmtProvider => "keymgmt/provider",
        }
    }

    /// List path template
    #[must_use]
    pub fn list_template(&self) -> &'static str {
        match self {
            Schema::DatabaseConnection => "{mount}/config",
            Schema::DatabaseRole | Schema::SshRole | Schema::AwsRole | Schema::PkiRole => {
                "{mount}/roles"
            }
            Schema::TransitKey => "{mount}/keys",
            Schema::Transformation => "{mount}/transformation",
            Schema::TransformRole => "{mount}/role",
            Schema::TransformTemplate => "{mount}/template",
            Schema::TransformAlphabet => "{mount}/alphabet",
            Schema::PkiCert => "{mount}/certs",
            Schema::Secret => "{mount}/{prefix}",
            Schema::SecretV2 => "{mount}/metadata/{prefix}",
            Schema::KeymgmtKey => "{mount}/key",
            Schema::KeymgmtProvider => "{mount}/kms",
        }
    }

    /// Single-record read path template
    #[must_use]
    pub fn read_template(&self) -> &'static str {
        match self {
            Schema::DatabaseConnection => "{mount}/config/{id}",
            Schema::DatabaseRole | Schema::SshRole | Schema::AwsRole | Schema::PkiRole => {
                "{mount}/roles/{id}"
            }
            Schema::TransitKey => "{mount}/keys/{id}",
            Schema::Transformation => "{mount}/transformation/{id}",
            Schema::TransformRole => "{mount}/role/{id}",
            Schema::TransformTemplate => "{mount}/template/{id}",
            Schema::TransformAlphabet => "{mount}/alphabet/{id}",
            Schema::PkiCert => "{mount}/cert/{id}",
            Schema::Secret => "{mount}/{id}",
            Schema::SecretV2 => "{mount}/metadata/{id}",
            Schema::KeymgmtKey => "{mount}/key/{id}",
            Schema::KeymgmtProvider => "{mount}/kms/{id}",
        }
    }

    /// Versioned KV metadata schema (permission-gated listing on 403)
    #[must_use]
    pub fn is_v2_kv(&self) -> bool {
        matches!(self, Schema::SecretV2)
    }

    /// Only secret schemas nest keys under a prefix
    #[must_use]
    pub fn is_nested(&self) -> bool {
        matches!(self, Schema::Secret | Schema::SecretV2)
    }

    /// Listing page carries well-known certificate records alongside it
    #[must_use]
    pub fn bears_certificates(&self) -> bool {
        matches!(self, Schema::PkiCert)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Schema; 15] = [
        Schema::DatabaseConnection,
        Schema::DatabaseRole,
        Schema::TransitKey,
        Schema::SshRole,
        Schema::Transformation,
        Schema::TransformRole,
        Schema::TransformTemplate,
        Schema::TransformAlphabet,
        Schema::AwsRole,
        Schema::PkiRole,
        Schema::PkiCert,
        Schema::Secret,
        Schema::SecretV2,
        Schema::KeymgmtKey,
        Schema::KeymgmtProvider,
    ];

    #[test]
    fn test_templates_start_with_mount() {
        for schema in ALL {
            assert!(schema.list_template().starts_with(MOUNT_PLACEHOLDER));
            assert!(schema.read_template().starts_with(MOUNT_PLACEHOLDER));
            assert!(schema.read_template().ends_with(ID_PLACEHOLDER));
        }
    }

    #[test]
    fn test_only_nested_schemas_take_a_prefix() {
        for schema in ALL {
            assert_eq!(
                schema.list_template().contains(PREFIX_PLACEHOLDER),
                schema.is_nested(),
                "prefix placeholder mismatch for {schema}"
            );
        }
    }

    #[test]
    fn test_schema_ids_are_unique() {
        let mut ids: Vec<_> = ALL.iter().map(Schema::id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ALL.len());
    }
}

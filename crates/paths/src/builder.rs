//! PathBuilder implementation
//!
//! Provides a builder for constructing API paths for a resolved schema,
//! either as a template with placeholders or as a concrete HTTP path.

use crate::errors::PathBuilderError;
use crate::formats::PathFormat;
use crate::operations::Operation;
use crate::schema::{Schema, ID_PLACEHOLDER, MOUNT_PLACEHOLDER, PREFIX_PLACEHOLDER};

const MOUNT_METADATA_TEMPLATE: &str = "sys/internal/ui/mounts/{mount}";

/// Builder for constructing API paths
///
/// # Example
///
/// ```rust
/// use paths::prelude::*;
///
/// let path = PathBuilder::new()
///     .schema(Schema::PkiCert)
///     .operation(Operation::Read)
///     .mount("pki/")
///     .id("ca_chain")
///     .build_http_path()
///     .unwrap();
/// assert_eq!(path, "pki/cert/ca_chain");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    schema: Option<Schema>,
    operation: Option<Operation>,
    mount: Option<String>,
    prefix: Option<String>,
    id: Option<String>,
}

impl PathBuilder {
    /// Create a new PathBuilder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Mount path; surrounding slashes are ignored
    pub fn mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = Some(mount.into());
        self
    }

    /// Listing prefix, only used by nested schemas
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    // Build methods
    pub fn build_template(&self) -> Result<String, PathBuilderError> {
        self.build(PathFormat::Template)
    }

    pub fn build_http_path(&self) -> Result<String, PathBuilderError> {
        self.build(PathFormat::HttpPath)
    }

    // Generic build with format
    pub fn build(&self, format: PathFormat) -> Result<String, PathBuilderError> {
        let operation = self
            .operation
            .ok_or_else(|| PathBuilderError::MissingRequiredParameter("operation".to_string()))?;

        let template = match operation {
            Operation::MountMetadata => MOUNT_METADATA_TEMPLATE,
            Operation::List => self.require_schema()?.list_template(),
            Operation::Read => self.require_schema()?.read_template(),
        };

        match format {
            PathFormat::Template => Ok(template.to_string()),
            PathFormat::HttpPath => self.substitute(template),
        }
    }

    fn require_schema(&self) -> Result<Schema, PathBuilderError> {
        self.schema
            .ok_or_else(|| PathBuilderError::MissingRequiredParameter("schema".to_string()))
    }

    // Replace placeholders with the configured values
    fn substitute(&self, template: &str) -> Result<String, PathBuilderError> {
        let mount = self
            .mount
            .as_deref()
            .map(|m| m.trim_matches('/'))
            .filter(|m| !m.is_empty())
            .ok_or_else(|| PathBuilderError::MissingRequiredParameter("mount".to_string()))?;

        let mut path = template.replace(MOUNT_PLACEHOLDER, mount);

        if path.contains(PREFIX_PLACEHOLDER) {
            let prefix = self.prefix.as_deref().unwrap_or("").trim_start_matches('/');
            path = path.replace(PREFIX_PLACEHOLDER, prefix);
        }

        if path.contains(ID_PLACEHOLDER) {
            let id = self
                .id
                .as_deref()
                .map(|id| id.trim_start_matches('/'))
                .filter(|id| !id.is_empty())
                .ok_or_else(|| PathBuilderError::MissingRequiredParameter("id".to_string()))?;
            path = path.replace(ID_PLACEHOLDER, id);
        }

        Ok(path)
    }
}

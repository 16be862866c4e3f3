//! Output format definitions for PathBuilder
//!
//! - Template: placeholders kept, e.g. "{mount}/metadata/{prefix}"
//! - HttpPath: values substituted, relative to `/v1/`, e.g. "secret/metadata/app/"

/// Output format for path construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathFormat {
    /// Path template with placeholders: "{mount}/metadata/{prefix}"
    Template,

    /// Concrete HTTP path without the `/v1/` prefix: "secret/metadata/app/"
    HttpPath,
}

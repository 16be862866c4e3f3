//! Error types for schema resolution and path construction

use std::fmt;

/// Errors that can occur during resolution or path construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathBuilderError {
    /// Engine type reported by the mount is not one the browser lists
    UnsupportedEngineType(String),

    /// KV-like engine whose version flag has not been loaded yet
    KvVersionUnknown(String),

    /// Required parameter is missing
    MissingRequiredParameter(String),
}

impl fmt::Display for PathBuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathBuilderError::UnsupportedEngineType(engine) => {
                write!(f, "Unsupported engine type: {engine}")
            }
            PathBuilderError::KvVersionUnknown(engine) => {
                write!(f, "KV version is not known yet for {engine} mount")
            }
            PathBuilderError::MissingRequiredParameter(param) => {
                write!(f, "Missing required parameter: {param}")
            }
        }
    }
}

impl std::error::Error for PathBuilderError {}

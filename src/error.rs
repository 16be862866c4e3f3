//! # Errors
//!
//! Error types shared by the store, the lister and the navigation controller.
//!
//! Raw transport errors only ever appear inside [`StoreError`]. The lister and
//! the controller classify them once; everything downstream sees either a
//! soft outcome or a [`NavigationError`] that already carries mount/path
//! context for the error view.

use paths::prelude::PathBuilderError;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by a [`crate::store::SecretStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    /// Server answered with a non-success status
    #[error("API request failed with status {status}: {}", .errors.join(", "))]
    Api { status: u16, errors: Vec<String> },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Response is missing field `{0}`")]
    MissingField(String),

    #[error(transparent)]
    Path(#[from] PathBuilderError),
}

impl StoreError {
    /// HTTP status attached to the error, if the server produced one
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            StoreError::Api { status, .. } => Some(*status),
            StoreError::Transport(err) => err.status().map(|s| s.as_u16()),
            StoreError::Decode(_) | StoreError::MissingField(_) | StoreError::Path(_) => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.http_status() == Some(404)
    }

    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.http_status() == Some(403)
    }
}

/// Context attached to a listing error before it reaches the error view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorContext {
    pub http_status: Option<u16>,
    pub secret_prefix: String,
    pub is_root_level: bool,
    pub mount_path: String,
}

impl ErrorContext {
    pub fn new(error: &StoreError, secret_prefix: &str, mount_path: &str) -> Self {
        Self {
            http_status: error.http_status(),
            secret_prefix: secret_prefix.to_string(),
            is_root_level: true,
            mount_path: mount_path.to_string(),
        }
    }
}

/// Hard failures of a navigation
#[derive(Debug, Error)]
pub enum NavigationError {
    /// KV-like mount whose version flag was never loaded
    #[error("KV version of mount '{mount_path}' is not loaded")]
    VersionUnknown { mount_path: String },

    /// Listing failed and could not be turned into a soft state
    #[error("Failed to list '{}' on mount '{}': {source}", .context.secret_prefix, .context.mount_path)]
    Listing {
        context: ErrorContext,
        source: StoreError,
    },

    #[error(transparent)]
    Path(#[from] PathBuilderError),
}

impl NavigationError {
    /// Error payload for the view layer, when the failure came from a listing
    #[must_use]
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            NavigationError::Listing { context, .. } => Some(context),
            NavigationError::VersionUnknown { .. } | NavigationError::Path(_) => None,
        }
    }
}

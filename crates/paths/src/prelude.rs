//! # Prelude
//!
//! Re-exports commonly used types for convenience.
//!
//! ```rust
//! use paths::prelude::*;
//!
//! assert!(is_supported("transit"));
//! assert!(!is_supported("kmip"));
//! ```

pub use crate::builder::PathBuilder;
pub use crate::engine::{is_supported, EngineType};
pub use crate::errors::PathBuilderError;
pub use crate::formats::PathFormat;
pub use crate::operations::Operation;
pub use crate::resolve::{resolve, KvVersion, ResourcePathSpec};
pub use crate::schema::Schema;

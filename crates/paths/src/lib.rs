//! Shared API path definitions for secret-engine listings
//!
//! This crate centralizes everything that maps a mounted secret engine to
//! the API paths the browser queries:
//!
//! - [`engine`] - the closed set of engine types the browser can list
//! - [`resolve`] - (engine, tab, KV version) to resource schema
//! - [`builder`] - schema + mount + prefix to a template or HTTP path
//!
//! ## Quick Start
//!
//! ```rust
//! use paths::prelude::*;
//!
//! let spec = resolve(EngineType::Kv, None, Some(KvVersion::V2)).unwrap();
//! let path = PathBuilder::new()
//!     .schema(spec.schema)
//!     .operation(Operation::List)
//!     .mount("secret")
//!     .prefix("app/")
//!     .build_http_path()
//!     .unwrap();
//! assert_eq!(path, "secret/metadata/app/");
//! ```

pub mod builder;
pub mod engine;
pub mod errors;
pub mod formats;
pub mod operations;
pub mod prelude;
pub mod resolve;
pub mod schema;

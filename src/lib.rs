//! Secret Browser Library
//!
//! Permission-aware listing of the resources held by mounted secret engines.
//!
//! A navigation picks the resource schema for the mount's engine type, lists
//! one page of keys through a [`SecretStore`](store::SecretStore), turns
//! 403/404 responses into soft view states where possible and projects the
//! result into a [`ViewState`](view::ViewState).
//!
//! ```no_run
//! use std::sync::Arc;
//! use secret_browser::{BrowserConfig, NavigationController, RouteParams, Transition, VaultStore};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Arc::new(VaultStore::new(&BrowserConfig::from_env())?);
//! store.load_mount("secret").await?;
//!
//! let controller = NavigationController::new(store);
//! let result = controller
//!     .navigate(Transition::new(RouteParams::nested("secret", "app/")))
//!     .await?;
//! println!("{:?}", result.view());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod lister;
pub mod mount;
pub mod navigation;
pub mod observability;
pub mod prefetch;
pub mod store;
pub mod view;

pub use config::BrowserConfig;
pub use error::{ErrorContext, NavigationError, StoreError};
pub use lister::{ListingOutcome, ListingRequest};
pub use mount::BackendMount;
pub use navigation::{
    NavigationController, NavigationResult, Phase, Redirect, RouteKind, RouteParams, Transition,
};
pub use prefetch::{AuxCertRecord, CertId};
pub use store::{ListingPage, PageMeta, SecretStore, VaultStore};
pub use view::ViewState;

/// Engine types, schemas and path building
pub use paths;

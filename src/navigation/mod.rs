//! # Navigation
//!
//! Drives one list-view navigation from route parameters to a rendered
//! [`ViewState`](crate::view::ViewState).
//!
//! ## Navigation Flow
//!
//! 1. **Entering**: look up the mount; unknown or unsupported mounts redirect
//!    to the secrets landing view
//! 2. **Normalizing**: clean up the prefix; a nested prefix without a
//!    trailing `/` redirects before anything is fetched
//! 3. **Resolving**: pick the schema for engine, tab and KV version
//! 4. **Listing**: list, then prefetch certificates on the certificate tab
//! 5. **Settled**: project the view and remember it
//!
//! Listing failures go through **ErrorRecovery**, which either aborts the
//! navigation and keeps the previous view or returns a
//! [`NavigationError`](crate::error::NavigationError).

mod controller;
mod route;
mod types;

pub use controller::NavigationController;
pub use route::{normalize_list_path, RouteKind, RouteParams, Transition};
pub use types::{NavigationResult, Phase, Redirect};

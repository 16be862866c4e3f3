//! # View State
//!
//! Projection of a classified listing into what the list view renders.

use serde::Serialize;

use crate::lister::ListingOutcome;
use crate::mount::BackendMount;
use crate::prefetch::AuxCertRecord;
use crate::store::PageMeta;

/// Render model of the list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub items: Vec<String>,
    pub has_no_permissions_at_root: bool,
    #[serde(rename = "has404")]
    pub has_404: bool,
    pub filter: String,
    pub page: usize,
    pub mount_path: String,
    pub mount_engine_type: String,
    pub meta: Option<PageMeta>,
    /// Certificate records on the certificate tab
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<AuxCertRecord>,
}

/// Filter shown in the filter box: the prefix plus any page filter typed
/// after it, or just the page filter at the root
#[must_use]
pub fn derive_filter(prefix: &str, page_filter: Option<&str>) -> String {
    let page_filter = page_filter.unwrap_or_default();
    if prefix.is_empty() {
        page_filter.to_string()
    } else {
        format!("{prefix}{page_filter}")
    }
}

/// Project a listing outcome into a [`ViewState`]
///
/// A [`ListingOutcome::Failure`] projects like an empty listing; the
/// navigation controller decides whether it is ever rendered.
#[must_use]
pub fn project(
    mount: &BackendMount,
    prefix: &str,
    page_filter: Option<&str>,
    outcome: &ListingOutcome,
    has_404: bool,
) -> ViewState {
    let page = outcome.page();
    ViewState {
        items: page.map(|p| p.keys.clone()).unwrap_or_default(),
        has_no_permissions_at_root: matches!(outcome, ListingOutcome::Forbidden { .. }),
        has_404,
        filter: derive_filter(prefix, page_filter),
        page: page.map_or(1, |p| p.meta.current_page),
        mount_path: mount.path.clone(),
        mount_engine_type: mount.engine_type.clone(),
        meta: page.map(|p| p.meta),
        certificates: Vec::new(),
    }
}

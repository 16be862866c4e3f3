//! # Paginated Lister
//!
//! Runs one listing query for a resolved schema and classifies the result.
//!
//! The classification is the part that matters:
//!
//! | response | condition | outcome |
//! |---|---|---|
//! | success | | [`ListingOutcome::Ok`] |
//! | 404 | root prefix, mount context present | [`ListingOutcome::EmptyNoPermissionsAtRoot`] |
//! | 403 | v2 KV schema | [`ListingOutcome::Forbidden`] |
//! | anything else | | [`ListingOutcome::Failure`] |
//!
//! A 404 at the root usually means the caller may not list the mount, not
//! that the mount is missing; the server gives no signal to tell the two
//! apart, so both render as an empty listing.

use std::time::Instant;

use paths::prelude::{ResourcePathSpec, Schema};
use tracing::{debug, info, warn};

use crate::constants::{DEFAULT_PAGE_SIZE, LIST_RESPONSE_PATH};
use crate::error::StoreError;
use crate::mount::BackendMount;
use crate::observability::metrics;
use crate::store::{ListQuery, ListingPage, SecretStore};

/// Classified result of a listing
#[derive(Debug)]
pub enum ListingOutcome {
    Ok(ListingPage),
    /// 404 at the root of a known mount; rendered as an empty list
    EmptyNoPermissionsAtRoot,
    /// 403 on a v2 KV listing; rendered as a permission-gated empty list
    Forbidden { at_root_kv2: bool },
    /// Any other error, left to the navigation controller
    Failure(StoreError),
}

impl ListingOutcome {
    /// Metric/log label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ListingOutcome::Ok(_) => "ok",
            ListingOutcome::EmptyNoPermissionsAtRoot => "empty_root",
            ListingOutcome::Forbidden { .. } => "forbidden",
            ListingOutcome::Failure(_) => "failure",
        }
    }

    /// Page data; only present on success
    #[must_use]
    pub fn page(&self) -> Option<&ListingPage> {
        match self {
            ListingOutcome::Ok(page) => Some(page),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, ListingOutcome::Failure(_))
    }
}

/// Inputs of a single listing
#[derive(Debug, Clone, Copy)]
pub struct ListingRequest<'a> {
    pub mount_path: &'a str,
    /// Prefix under the mount, empty at the root
    pub prefix: &'a str,
    /// 1-based; defaults to the first page
    pub page: Option<usize>,
    pub filter: Option<&'a str>,
    pub page_size: usize,
}

impl<'a> ListingRequest<'a> {
    pub fn new(mount_path: &'a str, prefix: &'a str) -> Self {
        Self {
            mount_path,
            prefix,
            page: None,
            filter: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    fn to_query(self) -> ListQuery {
        ListQuery {
            id_prefix: self.prefix.to_string(),
            mount_path: self.mount_path.to_string(),
            page: self.page.unwrap_or(1).max(1),
            filter: self.filter.filter(|f| !f.is_empty()).map(str::to_string),
            response_path: LIST_RESPONSE_PATH.to_string(),
            page_size: self.page_size,
        }
    }
}

/// List one page for `spec` and classify the result
///
/// `parent` is the mount the listing runs under; without it a root 404 is a
/// plain failure.
pub async fn list<S>(
    store: &S,
    spec: &ResourcePathSpec,
    request: ListingRequest<'_>,
    parent: Option<&BackendMount>,
) -> ListingOutcome
where
    S: SecretStore + ?Sized,
{
    let start = Instant::now();
    let query = request.to_query();

    debug!(
        "Listing {} on {} (prefix={:?}, page={}, filter={:?})",
        spec.schema, query.mount_path, query.id_prefix, query.page, query.filter
    );

    let result = store.list_query(spec.schema, &query).await;
    let outcome = classify(result, spec.schema, request.prefix, parent.is_some());

    metrics::record_listing(outcome.label(), start.elapsed().as_secs_f64());
    match &outcome {
        ListingOutcome::Ok(page) => debug!(
            "Listed {} of {} keys on {}",
            page.keys.len(),
            page.meta.filtered_total,
            query.mount_path
        ),
        ListingOutcome::EmptyNoPermissionsAtRoot => info!(
            "No keys visible at root of {}, showing empty listing",
            query.mount_path
        ),
        ListingOutcome::Forbidden { .. } => info!(
            "Listing {} on {} is forbidden, showing permission-gated listing",
            spec.schema, query.mount_path
        ),
        ListingOutcome::Failure(err) => warn!(
            "Listing {} on {} failed: {}",
            spec.schema, query.mount_path, err
        ),
    }

    outcome
}

/// Classify a listing result
pub fn classify(
    result: Result<ListingPage, StoreError>,
    schema: Schema,
    prefix: &str,
    has_parent: bool,
) -> ListingOutcome {
    match result {
        Ok(page) => ListingOutcome::Ok(page),
        Err(err) if err.is_not_found() && prefix.is_empty() && has_parent => {
            ListingOutcome::EmptyNoPermissionsAtRoot
        }
        Err(err) if err.is_forbidden() && schema.is_v2_kv() => {
            ListingOutcome::Forbidden { at_root_kv2: true }
        }
        Err(err) => ListingOutcome::Failure(err),
    }
}

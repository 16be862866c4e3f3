//! # Navigation Controller
//!
//! Owns the list view's state across navigations: the last settled view,
//! the route it belongs to and the generation of the newest navigation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use paths::prelude::{resolve, EngineType, PathBuilderError, ResourcePathSpec};
use tracing::{debug, info, info_span, warn, Instrument};

use super::route::{normalize_list_path, RouteKey, RouteKind, Transition};
use super::types::{NavigationResult, Phase, Redirect};
use crate::constants::DEFAULT_PAGE_SIZE;
use crate::error::{ErrorContext, NavigationError, StoreError};
use crate::lister::{self, ListingOutcome, ListingRequest};
use crate::mount::BackendMount;
use crate::observability::metrics;
use crate::prefetch::prefetch_certificates;
use crate::store::SecretStore;
use crate::view::{project, ViewState};

#[derive(Debug, Default)]
struct ControllerState {
    phase: Phase,
    last_key: Option<RouteKey>,
    last_view: Option<ViewState>,
    last_transition: Option<Transition>,
}

/// List-view navigation controller
///
/// Navigations may overlap; only the newest one may change state; older ones
/// resolve to [`NavigationResult::Superseded`].
pub struct NavigationController<S: SecretStore + ?Sized> {
    store: Arc<S>,
    page_size: usize,
    generation: AtomicU64,
    state: Mutex<ControllerState>,
}

impl<S: SecretStore + ?Sized> std::fmt::Debug for NavigationController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("page_size", &self.page_size)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<S: SecretStore + ?Sized> NavigationController<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_page_size(store, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(store: Arc<S>, page_size: usize) -> Self {
        Self {
            store,
            page_size: page_size.max(1),
            generation: AtomicU64::new(0),
            state: Mutex::new(ControllerState::default()),
        }
    }

    /// Phase of the newest navigation
    pub fn phase(&self) -> Phase {
        self.lock_state().phase
    }

    /// Last view that was rendered
    pub fn current_view(&self) -> Option<ViewState> {
        self.lock_state().last_view.clone()
    }

    /// Whether a listing has settled since the route was entered
    pub fn has_model(&self) -> bool {
        self.lock_state().last_view.is_some()
    }

    /// Run a navigation
    ///
    /// # Errors
    /// Returns a [`NavigationError`] when the listing fails in a way that
    /// cannot be shown as a soft state, or when a KV mount's version is not
    /// loaded
    pub async fn navigate(
        &self,
        transition: Transition,
    ) -> Result<NavigationResult, NavigationError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let span = info_span!(
            "navigation",
            mount.path = %transition.params.mount_path,
            secret.prefix = %transition.params.path_prefix,
            generation
        );

        let result = self.run(generation, &transition).instrument(span).await;
        let label = match &result {
            Ok(outcome) => outcome.label(),
            Err(_) => "error",
        };
        metrics::record_navigation(label);
        result
    }

    /// Leave the list route
    ///
    /// Drops cached listings, forgets the rendered view and supersedes any
    /// navigation still in flight.
    pub fn leave(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.invalidate();
        *self.lock_state() = ControllerState::default();
        debug!("Left list route");
    }

    /// Drop cached listings and re-run the last navigation
    ///
    /// Returns `Ok(None)` when nothing was navigated to yet.
    ///
    /// # Errors
    /// Same as [`Self::navigate`]
    pub async fn reload(&self) -> Result<Option<NavigationResult>, NavigationError> {
        self.invalidate();
        let last = self.lock_state().last_transition.clone();
        match last {
            Some(transition) => {
                info!("Reloading {}", transition.params.mount_path);
                self.navigate(Transition::new(transition.params)).await.map(Some)
            }
            None => Ok(None),
        }
    }

    async fn run(
        &self,
        generation: u64,
        transition: &Transition,
    ) -> Result<NavigationResult, NavigationError> {
        let params = &transition.params;

        self.enter_phase(generation, Phase::Entering);
        let Some(mount) = self.store.peek_cached_mount(&params.mount_path) else {
            info!("Mount {} is not known, redirecting", params.mount_path);
            return Ok(self.redirect(generation, Redirect::SecretsLanding));
        };
        let Some(engine) = mount.engine() else {
            info!(
                "Mount {} has engine type {} which has no list view, redirecting",
                mount.path, mount.engine_type
            );
            return Ok(self.redirect(generation, Redirect::SecretsLanding));
        };

        self.enter_phase(generation, Phase::Normalizing);
        let prefix = match params.kind {
            RouteKind::ListRoot => String::new(),
            RouteKind::List => {
                let prefix = normalize_list_path(&params.path_prefix);
                if !prefix.is_empty() && !prefix.ends_with('/') {
                    let path = format!("{prefix}/");
                    debug!("Prefix lacks trailing slash, redirecting to {}", path);
                    return Ok(self.redirect(generation, Redirect::Replace { path }));
                }
                prefix
            }
        };

        self.enter_phase(generation, Phase::Resolving);
        let spec = Self::resolve_spec(engine, &mount, params.tab.as_deref())?;
        debug!("Resolved schema {} for {}", spec.schema, mount.path);

        let key = RouteKey::new(params, &prefix);
        let route_changed = {
            let state = self.lock_state();
            state.last_key.as_ref().is_some_and(|last| *last != key)
        };
        if route_changed {
            self.invalidate();
        }

        self.enter_phase(generation, Phase::Listing);
        let request = ListingRequest {
            mount_path: &mount.path,
            prefix: &prefix,
            page: params.page,
            filter: params.page_filter.as_deref(),
            page_size: self.page_size,
        };
        let outcome = lister::list(self.store.as_ref(), &spec, request, Some(&mount)).await;

        // Auxiliary fetches unload records on the shared store
        if !self.is_current(generation) {
            debug!("Navigation {} superseded before prefetch", generation);
            return Ok(NavigationResult::Superseded);
        }

        let certificates = if spec.schema.bears_certificates() && !outcome.is_failure() {
            prefetch_certificates(self.store.as_ref(), &mount.path).await
        } else {
            Vec::new()
        };

        let mut state = self.lock_state();
        if !self.is_current(generation) {
            debug!("Navigation {} superseded, discarding result", generation);
            return Ok(NavigationResult::Superseded);
        }

        if let ListingOutcome::Failure(error) = outcome {
            state.phase = Phase::ErrorRecovery;
            return Self::recover(&mut state, transition, &mount, &prefix, error);
        }

        let mut view = project(
            &mount,
            &prefix,
            params.page_filter.as_deref(),
            &outcome,
            false,
        );
        view.certificates = certificates;

        state.phase = Phase::Settled;
        state.last_key = Some(key);
        state.last_view = Some(view.clone());
        state.last_transition = Some(transition.clone());
        info!(
            "Settled {} with {} items (page {})",
            mount.path,
            view.items.len(),
            view.page
        );
        Ok(NavigationResult::Settled(view))
    }

    fn resolve_spec(
        engine: EngineType,
        mount: &BackendMount,
        tab: Option<&str>,
    ) -> Result<ResourcePathSpec, NavigationError> {
        match resolve(engine, tab, mount.kv_version) {
            Ok(spec) => Ok(spec),
            Err(PathBuilderError::KvVersionUnknown(_)) => {
                warn!("KV version of mount {} is not loaded", mount.path);
                Err(NavigationError::VersionUnknown {
                    mount_path: mount.path.clone(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn recover(
        state: &mut ControllerState,
        transition: &Transition,
        mount: &BackendMount,
        prefix: &str,
        error: StoreError,
    ) -> Result<NavigationResult, NavigationError> {
        let context = ErrorContext::new(&error, prefix, &mount.path);

        if error.is_not_found() && !transition.is_deletion {
            if let Some(view) = state.last_view.as_mut() {
                info!(
                    "Prefix {:?} on {} not found, keeping previous listing",
                    prefix, mount.path
                );
                view.has_404 = true;
                return Ok(NavigationResult::Aborted(view.clone()));
            }
        }

        warn!(
            "Navigation to {:?} on {} failed: {}",
            prefix, mount.path, error
        );
        Err(NavigationError::Listing {
            context,
            source: error,
        })
    }

    fn invalidate(&self) {
        self.store.invalidate_all();
        metrics::increment_cache_invalidations();
    }

    /// Redirects end the navigation without a view
    fn redirect(&self, generation: u64, redirect: Redirect) -> NavigationResult {
        self.enter_phase(generation, Phase::Idle);
        NavigationResult::Redirect(redirect)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn enter_phase(&self, generation: u64, phase: Phase) {
        if self.is_current(generation) {
            self.lock_state().phase = phase;
            debug!("Phase {}", phase);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

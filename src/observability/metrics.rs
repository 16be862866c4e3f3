//! # Metrics
//!
//! Prometheus metrics for listing and navigation.
//!
//! ## Metrics Exposed
//!
//! - `secret_browser_listings_total{outcome}` - Listings by classified outcome
//! - `secret_browser_listing_duration_seconds` - Duration of listing queries
//! - `secret_browser_certificate_prefetch_total{result}` - Auxiliary certificate fetches
//! - `secret_browser_navigations_total{result}` - Navigations by final result
//! - `secret_browser_cache_invalidations_total` - Cache invalidations

use prometheus::{Encoder, Histogram, IntCounter, IntCounterVec, Registry, TextEncoder};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static LISTINGS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "secret_browser_listings_total",
            "Total number of listings by classified outcome",
        ),
        &["outcome"],
    )
    .expect("Failed to create LISTINGS_TOTAL metric - this should never happen")
});

static LISTING_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "secret_browser_listing_duration_seconds",
            "Duration of listing queries in seconds",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0]),
    )
    .expect("Failed to create LISTING_DURATION metric - this should never happen")
});

static CERTIFICATE_PREFETCH_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "secret_browser_certificate_prefetch_total",
            "Total number of auxiliary certificate fetches by result",
        ),
        &["result"],
    )
    .expect("Failed to create CERTIFICATE_PREFETCH_TOTAL metric - this should never happen")
});

static NAVIGATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "secret_browser_navigations_total",
            "Total number of navigations by result",
        ),
        &["result"],
    )
    .expect("Failed to create NAVIGATIONS_TOTAL metric - this should never happen")
});

static CACHE_INVALIDATIONS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "secret_browser_cache_invalidations_total",
        "Total number of listing cache invalidations",
    )
    .expect("Failed to create CACHE_INVALIDATIONS_TOTAL metric - this should never happen")
});

/// Register all metrics with the registry
///
/// Registering twice is not an error.
///
/// # Errors
/// Returns an error if a metric cannot be registered for another reason
pub fn register_metrics() -> Result<(), prometheus::Error> {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(LISTINGS_TOTAL.clone()),
        Box::new(LISTING_DURATION.clone()),
        Box::new(CERTIFICATE_PREFETCH_TOTAL.clone()),
        Box::new(NAVIGATIONS_TOTAL.clone()),
        Box::new(CACHE_INVALIDATIONS_TOTAL.clone()),
    ];

    for collector in collectors {
        match REGISTRY.register(collector) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Render registered metrics in the Prometheus text format
pub fn gather_text() -> String {
    let mut buffer = Vec::new();
    if TextEncoder::new()
        .encode(&REGISTRY.gather(), &mut buffer)
        .is_err()
    {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

pub fn record_listing(outcome: &str, duration: f64) {
    LISTINGS_TOTAL.with_label_values(&[outcome]).inc();
    LISTING_DURATION.observe(duration);
}

pub fn record_certificate_prefetch(result: &str) {
    CERTIFICATE_PREFETCH_TOTAL.with_label_values(&[result]).inc();
}

pub fn record_navigation(result: &str) {
    NAVIGATIONS_TOTAL.with_label_values(&[result]).inc();
}

pub fn increment_cache_invalidations() {
    CACHE_INVALIDATIONS_TOTAL.inc();
}

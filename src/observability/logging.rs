//! # Logging
//!
//! `RUST_LOG` wins when set; otherwise the configured `LOG_LEVEL` is used.

use tracing_subscriber::EnvFilter;

use crate::config::BrowserConfig;

/// Install the global fmt subscriber
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing(config: &BrowserConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

//! # Browser Configuration
//!
//! Client-level settings loaded from environment variables.

use std::time::Duration;

use zeroize::Zeroizing;

use crate::constants::{
    DEFAULT_LOG_LEVEL, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_VAULT_ADDR,
};

/// Browser configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Clone)]
pub struct BrowserConfig {
    /// Server address (`VAULT_ADDR`)
    pub vault_addr: String,
    /// Client token (`VAULT_TOKEN`), sent on every request when present
    pub vault_token: Option<Zeroizing<String>>,
    /// Namespace (`VAULT_NAMESPACE`)
    pub vault_namespace: Option<String>,
    /// Keys per listing page (`PAGE_SIZE`)
    pub page_size: usize,
    /// HTTP request timeout in seconds (`REQUEST_TIMEOUT_SECS`)
    pub request_timeout_secs: u64,
    /// Log filter used when `RUST_LOG` is unset (`LOG_LEVEL`)
    pub log_level: String,
}

impl std::fmt::Debug for BrowserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserConfig")
            .field("vault_addr", &self.vault_addr)
            .field("vault_token", &self.vault_token.as_ref().map(|_| "<redacted>"))
            .field("vault_namespace", &self.vault_namespace)
            .field("page_size", &self.page_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            vault_addr: DEFAULT_VAULT_ADDR.to_string(),
            vault_token: None,
            vault_namespace: None,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl BrowserConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            vault_addr: env_var_or_default_str("VAULT_ADDR", DEFAULT_VAULT_ADDR),
            vault_token: env_var_non_empty("VAULT_TOKEN").map(Zeroizing::new),
            vault_namespace: env_var_non_empty("VAULT_NAMESPACE"),
            page_size: env_var_or_default("PAGE_SIZE", DEFAULT_PAGE_SIZE).max(1),
            request_timeout_secs: env_var_or_default(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            log_level: env_var_or_default_str("LOG_LEVEL", DEFAULT_LOG_LEVEL),
        }
    }

    /// Get request timeout duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Read environment variable or return default value
fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read environment variable as string or return default
fn env_var_or_default_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_var_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BrowserConfig::default();
        assert_eq!(config.vault_addr, "http://127.0.0.1:8200");
        assert_eq!(config.page_size, 15);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.vault_token.is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = BrowserConfig {
            vault_token: Some(Zeroizing::new("s.very-secret".to_string())),
            ..BrowserConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_env_parsing_falls_back_on_garbage() {
        assert_eq!(env_var_or_default("SB_TEST_UNSET_VARIABLE", 7usize), 7);
    }
}

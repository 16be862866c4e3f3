//! # Constants
//!
//! Shared constants used throughout the browser.
//!
//! These values represent reasonable defaults and can be overridden via
//! environment variables where applicable.

/// Default server address when `VAULT_ADDR` is not set
pub const DEFAULT_VAULT_ADDR: &str = "http://127.0.0.1:8200";

/// Default number of keys shown per listing page
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Default HTTP request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default log filter when neither `RUST_LOG` nor `LOG_LEVEL` is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Field of a LIST response body that holds the keys
pub const LIST_RESPONSE_PATH: &str = "data.keys";

/// Payload field an auxiliary certificate record must carry to be kept
pub const CERTIFICATE_FIELD: &str = "certificate";

/// Header carrying the client token
pub const TOKEN_HEADER: &str = "X-Vault-Token";

/// Header carrying the namespace, when one is configured
pub const NAMESPACE_HEADER: &str = "X-Vault-Namespace";

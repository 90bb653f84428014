//! HTTP-specific constants for the Uvipay API.

use std::time::Duration;

/// Base URL of the Uvipay payment API, without trailing slash.
pub const DEFAULT_BASE_URL: &str = "https://api.uviba.com/pay/v1";

/// Timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Content type of every request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// User agent sent unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("uvipay-rs/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the private key.
pub const ENV_PRIVATE_KEY: &str = "UVIPAY_PRIVATE_KEY";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const ENV_BASE_URL: &str = "UVIPAY_BASE_URL";

/// Environment variable overriding [`DEFAULT_TIMEOUT`], in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "UVIPAY_TIMEOUT_SECS";

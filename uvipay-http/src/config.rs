//! Transport configuration.
//!
//! [`TransportConfig`] is built in code; [`EnvConfig`] reads the same
//! settings plus the private key from the process environment, loading a
//! `.env` file first when one exists.
//!
//! # Environment Variables
//!
//! - `UVIPAY_PRIVATE_KEY` — Private key (required)
//! - `UVIPAY_BASE_URL` — Override the API base URL
//! - `UVIPAY_TIMEOUT_SECS` — Override the request timeout, in seconds

use std::time::Duration;

use uvipay::PrivateKey;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ENV_BASE_URL, ENV_PRIVATE_KEY,
    ENV_TIMEOUT_SECS,
};
use crate::error::HttpError;

/// Configuration for [`HttpTransport`](crate::HttpTransport).
pub struct TransportConfig {
    /// API base URL. A trailing slash is ignored.
    pub base_url: String,

    /// Timeout for each request. Ignored when `http_client` is set.
    pub timeout: Duration,

    /// `User-Agent` header value. Ignored when `http_client` is set.
    pub user_agent: String,

    /// Optional pre-configured reqwest client. If `None`, a new client is
    /// created with the configured timeout and user agent.
    pub http_client: Option<reqwest::Client>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            http_client: None,
        }
    }
}

impl TransportConfig {
    /// Creates a config for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl std::fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("has_http_client", &self.http_client.is_some())
            .finish()
    }
}

/// Client settings read from the environment.
#[derive(Debug)]
pub struct EnvConfig {
    /// Validated private key.
    pub key: PrivateKey,
    /// Transport settings, defaults unless overridden.
    pub transport: TransportConfig,
}

impl EnvConfig {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the key is missing or invalid, or the timeout
    /// is not a positive number of seconds.
    pub fn from_env() -> Result<Self, HttpError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Same as [`EnvConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HttpError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let raw_key = var(ENV_PRIVATE_KEY).ok_or(HttpError::MissingEnv(ENV_PRIVATE_KEY))?;
        let key = PrivateKey::new(&raw_key)?;

        let mut transport = TransportConfig::default();
        if let Some(base_url) = var(ENV_BASE_URL) {
            transport.base_url = base_url.trim().to_owned();
        }
        if let Some(timeout) = var(ENV_TIMEOUT_SECS) {
            transport.timeout = parse_timeout(&timeout)?;
        }

        Ok(Self { key, transport })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, HttpError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(HttpError::InvalidTimeout(raw.to_owned())),
    }
}

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP transport for the Uvipay payment API client.
//!
//! Provides [`HttpTransport`], a `reqwest`-backed [`uvipay::Transport`], and
//! shortcuts that build a ready [`Client`].
//!
//! # Modules
//!
//! - [`config`] — Transport settings, in code or from the environment
//! - [`constants`] — Base URL, timeout, content type, variable names
//! - [`error`] — Errors raised while building a client
//! - [`transport`] — The `reqwest` transport
//!
//! # Example
//!
//! ```no_run
//! use uvipay::{Charge, Params};
//!
//! # async fn example() -> Result<(), uvipay_http::error::HttpError> {
//! let client = uvipay_http::client("sk_test_f45349e0dc5c6a7927fd75c19c00f448")?;
//!
//! let charged = client.charge(Charge::new("0c66b09933685b7258d5bfa1971b_779", 1000)).await;
//! if let Some(id) = charged.get("id").and_then(|id| id.as_str()) {
//!     let refunded = client.refund(id, Params::new().with("amount", 1000)).await;
//!     println!("refund succeeded: {}", refunded.is_success());
//! } else if let Some(error) = charged.error() {
//!     println!("charge failed: {error}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod transport;

pub use config::{EnvConfig, TransportConfig};
pub use error::HttpError;
pub use transport::HttpTransport;

use uvipay::{PrivateKey, UvipayClient};

/// A Uvipay client talking HTTP.
pub type Client = UvipayClient<HttpTransport>;

/// Builds a client for the production API with default settings.
///
/// # Errors
///
/// Returns [`HttpError`] if the key is invalid or the HTTP client cannot be
/// built.
pub fn client(key: &str) -> Result<Client, HttpError> {
    client_with_config(key, TransportConfig::default())
}

/// Builds a client with custom transport settings.
///
/// # Errors
///
/// Returns [`HttpError`] if the key or the base URL is invalid, or the HTTP
/// client cannot be built.
pub fn client_with_config(key: &str, config: TransportConfig) -> Result<Client, HttpError> {
    let key = PrivateKey::new(key)?;
    Ok(UvipayClient::from_key(key, HttpTransport::new(config)?))
}

/// Builds a client from `UVIPAY_*` environment variables, loading `.env`
/// first when present.
///
/// # Errors
///
/// Returns [`HttpError`] if a variable is missing or invalid, or the HTTP
/// client cannot be built.
pub fn client_from_env() -> Result<Client, HttpError> {
    let EnvConfig { key, transport } = EnvConfig::from_env()?;
    Ok(UvipayClient::from_key(key, HttpTransport::new(transport)?))
}

//! A [`Transport`] that talks to the Uvipay API over HTTP.
//!
//! Requests are form-encoded POSTs authenticated with HTTP Basic auth: the
//! private key is the username and the password is empty.
//!
//! Every response that arrives is handed back as is, whatever its status
//! code; the client decides what it means. Only exchanges that never
//! complete (connection errors, timeouts) become a [`TransportError`].

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use url::{Url, form_urlencoded};
use uvipay::{Params, PrivateKey, RawResponse, Transport, TransportError};

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::config::TransportConfig;
use crate::constants::FORM_CONTENT_TYPE;
use crate::error::HttpError;

/// `reqwest`-backed transport with a fixed base URL and timeout.
///
/// Clones share the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use uvipay_http::{HttpTransport, TransportConfig};
///
/// let transport = HttpTransport::new(TransportConfig::default()).unwrap();
/// assert_eq!(transport.base_url(), "https://api.uviba.com/pay/v1");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Base URL without trailing slash.
    base_url: String,
    /// Shared reqwest HTTP client.
    client: Client,
}

impl HttpTransport {
    /// Creates a transport from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: TransportConfig) -> Result<Self, HttpError> {
        let base_url = validate_base_url(&config.base_url)?;
        let client = match config.http_client {
            Some(client) => client,
            None => Client::builder()
                .timeout(config.timeout)
                .user_agent(config.user_agent)
                .build()
                .map_err(HttpError::Client)?,
        };
        Ok(Self { base_url, client })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL.
    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "uvipay_http.post_form", skip_all, fields(path = %path), err)
    )]
    async fn post_form(
        &self,
        path: &str,
        params: &Params,
        key: &PrivateKey,
    ) -> Result<RawResponse, TransportError> {
        let url = self.url(path);

        #[cfg(feature = "telemetry")]
        tracing::debug!(url = %url, fields = params.len(), "sending request");

        let response = self
            .client
            .post(url)
            .basic_auth(key.expose_secret(), Some(""))
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(encode_form(params))
            .send()
            .await
            .map_err(|e| TransportError::new(format!("POST {path} failed: {e}")))?;

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => Ok(RawResponse::text(status, body)),
            Err(e) => Err(
                TransportError::new(format!("POST {path}: failed to read response body: {e}"))
                    .with_response(RawResponse::empty(status)),
            ),
        }
    }
}

/// Encodes `params` as an `application/x-www-form-urlencoded` body.
fn encode_form(params: &Params) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(key, value)| (key, value.to_string())))
        .finish()
}

/// Checks that `raw` is an absolute http(s) URL usable as an API root and
/// returns it without trailing slash.
fn validate_base_url(raw: &str) -> Result<String, HttpError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|source| HttpError::InvalidBaseUrl {
        url: raw.to_owned(),
        source,
    })?;
    let usable = matches!(url.scheme(), "http" | "https")
        && url.has_host()
        && url.query().is_none()
        && url.fragment().is_none();
    if usable {
        Ok(trimmed.to_owned())
    } else {
        Err(HttpError::UnsupportedBaseUrl(raw.to_owned()))
    }
}

//! The seam between the client and the network.

use std::sync::Arc;

use async_trait::async_trait;

use crate::key::PrivateKey;
use crate::params::Params;
use crate::response::{RawResponse, TransportError};

/// Sends authenticated form posts to the Uvipay API.
///
/// Implementations own the base URL, the timeout and the wire encoding:
/// `params` go out as an `application/x-www-form-urlencoded` body and `key`
/// as the HTTP Basic username with an empty password.
///
/// Every response that arrives, whatever its status code, must be returned
/// as `Ok`. `Err` is reserved for exchanges that could not complete.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `params` to `path`, relative to the API base URL.
    async fn post_form(
        &self,
        path: &str,
        params: &Params,
        key: &PrivateKey,
    ) -> Result<RawResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post_form(
        &self,
        path: &str,
        params: &Params,
        key: &PrivateKey,
    ) -> Result<RawResponse, TransportError> {
        (**self).post_form(path, params, key).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn post_form(
        &self,
        path: &str,
        params: &Params,
        key: &PrivateKey,
    ) -> Result<RawResponse, TransportError> {
        (**self).post_form(path, params, key).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn post_form(
        &self,
        path: &str,
        params: &Params,
        key: &PrivateKey,
    ) -> Result<RawResponse, TransportError> {
        (**self).post_form(path, params, key).await
    }
}

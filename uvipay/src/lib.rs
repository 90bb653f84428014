#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core client for the Uvipay payment API.
//!
//! This crate knows the shape of the Uvipay REST API: which endpoint each
//! operation posts to, how its parameters are assembled, and how replies are
//! normalized. It does no I/O itself; requests go through a [`Transport`],
//! with the `reqwest` implementation living in the `uvipay-http` crate.
//!
//! # Overview
//!
//! Every operation resolves to an [`Envelope`], the JSON object returned by
//! the server. When the reply is missing or unusable the envelope is
//! [`Envelope::default_error`]. Operations never return `Err`; the only
//! error type callers handle is [`ConfigError`], raised when a client is
//! built with an invalid key.
//!
//! # Modules
//!
//! - [`client`] - The [`UvipayClient`] and its operations
//! - [`constants`] - Endpoint paths and protocol field values
//! - [`envelope`] - The normalized response envelope
//! - [`error`] - Configuration errors
//! - [`key`] - Validated private keys
//! - [`params`] - Flat request parameters
//! - [`requests`] - Typed builders for common requests
//! - [`response`] - Raw transport results and normalization
//! - [`transport`] - The transport seam
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring

pub mod client;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod key;
pub mod params;
pub mod requests;
pub mod response;
pub mod transport;

pub use client::UvipayClient;
pub use envelope::{ApiError, Envelope};
pub use error::ConfigError;
pub use key::PrivateKey;
pub use params::{Lead, ParamValue, Params};
pub use requests::{Charge, Paylink, Refund, SendPayment};
pub use response::{Body, RawResponse, TransportError, normalize};
pub use transport::Transport;

/// Re-exported so transports can be implemented without a direct dependency.
pub use async_trait::async_trait;

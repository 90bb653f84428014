//! Error types for the Uvipay client.
//!
//! Only configuration problems are errors. Anything that goes wrong while
//! talking to the API is reported through an [`Envelope`](crate::Envelope)
//! with `status: false`.

use crate::constants::MIN_KEY_LENGTH;

/// Invalid client configuration, raised when a client is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No private key was supplied (empty or whitespace only).
    #[error("Please define private key before using the client")]
    MissingKey,

    /// The private key is shorter than [`MIN_KEY_LENGTH`].
    #[error("private key is too short: {len} characters, at least {min} required")]
    KeyTooShort {
        /// Length of the supplied key after trimming.
        len: usize,
        /// Required minimum length.
        min: usize,
    },

    /// The private key does not start with
    /// [`KEY_PREFIX`](crate::constants::KEY_PREFIX).
    #[error("private key must start with `sk_`")]
    InvalidPrefix,
}

impl ConfigError {
    pub(crate) const fn too_short(len: usize) -> Self {
        Self::KeyTooShort {
            len,
            min: MIN_KEY_LENGTH,
        }
    }
}

//! Merchant private key.

use std::fmt;

use crate::constants::{KEY_PREFIX, LIVE_KEY_PREFIX, MIN_KEY_LENGTH};
use crate::error::ConfigError;

/// A validated Uvipay private key.
///
/// Surrounding whitespace is trimmed before validation. The key is never
/// printed by [`Debug`]; only its mode is.
///
/// # Example
///
/// ```rust
/// use uvipay::PrivateKey;
///
/// let key = PrivateKey::new("sk_test_f45349e0dc5c6a7927fd").unwrap();
/// assert!(!key.is_live());
/// assert!(PrivateKey::new("pk_test_f45349e0dc5c6a7927fd").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    secret: String,
    live: bool,
}

impl PrivateKey {
    /// Validates and wraps a private key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the key is empty, shorter than
    /// [`MIN_KEY_LENGTH`] or does not start with [`KEY_PREFIX`].
    pub fn new(key: &str) -> Result<Self, ConfigError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::MissingKey);
        }
        let len = key.chars().count();
        if len < MIN_KEY_LENGTH {
            return Err(ConfigError::too_short(len));
        }
        if !key.starts_with(KEY_PREFIX) {
            return Err(ConfigError::InvalidPrefix);
        }
        Ok(Self {
            live: key.starts_with(LIVE_KEY_PREFIX),
            secret: key.to_owned(),
        })
    }

    /// Returns the raw key, for use as the Basic auth username.
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.secret
    }

    /// Returns `true` for `sk_live_` keys.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.live
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("live", &self.live)
            .finish_non_exhaustive()
    }
}

impl std::str::FromStr for PrivateKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

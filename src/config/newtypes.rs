//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers that validate their contents on
//! construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer};
use std::fmt;

/// A validated webhook signing secret.
///
/// This newtype ensures the secret is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs. The secret is held as raw
/// bytes and used unchanged as the HMAC key.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `WebhookSecret(*****)` instead of the actual key.
///
/// # Example
///
/// ```rust
/// use shopify_webhook::WebhookSecret;
///
/// let secret = WebhookSecret::new("my-secret").unwrap();
/// assert_eq!(secret.as_bytes(), b"my-secret");
/// assert_eq!(format!("{:?}", secret), "WebhookSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookSecret(Vec<u8>);

impl WebhookSecret {
    /// Creates a new validated webhook secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecret`] if the secret is empty.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self(secret))
    }

    /// Returns the secret as a byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for WebhookSecret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(*****)")
    }
}

impl<'de> Deserialize<'de> for WebhookSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

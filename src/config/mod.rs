//! Configuration types for webhook verification.
//!
//! This module provides the configuration captured once at startup and
//! threaded into the verifier and the request adapter.
//!
//! # Overview
//!
//! - [`WebhookConfig`]: Immutable verification settings
//! - [`WebhookConfigBuilder`]: A builder for constructing [`WebhookConfig`] instances
//! - [`WebhookSecret`]: A validated shared secret with masked debug output
//! - [`SignatureEncoding`]: How the signature header encodes the digest
//!
//! # Example
//!
//! ```rust
//! use shopify_webhook::{SignatureEncoding, WebhookConfig, WebhookSecret};
//!
//! let config = WebhookConfig::builder()
//!     .secret(WebhookSecret::new("my-secret").unwrap())
//!     .encoding(SignatureEncoding::Base64)
//!     .build()
//!     .unwrap();
//! ```

mod encoding;
mod newtypes;

pub use encoding::SignatureEncoding;
pub use newtypes::WebhookSecret;

use http::HeaderName;

use crate::error::ConfigError;
use crate::webhooks::{HEADER_HMAC, HEADER_SHOP_DOMAIN};

/// Configuration for webhook signature verification.
///
/// # Thread Safety
///
/// `WebhookConfig` is `Clone`, `Send`, and `Sync`. It is never mutated after
/// construction, so it can be shared across request-handling tasks behind an
/// `Arc` without locking.
///
/// # Key Rotation
///
/// The `old_secret` field supports seamless secret rotation. When the primary
/// secret does not verify a delivery, the old secret is tried next so that
/// webhooks signed before the rotation still verify.
///
/// # Example
///
/// ```rust
/// use shopify_webhook::{SignatureEncoding, WebhookConfig, WebhookSecret};
///
/// let config = WebhookConfig::new(WebhookSecret::new("secret").unwrap());
/// assert_eq!(config.encoding(), SignatureEncoding::Base64);
/// assert_eq!(config.shop_header(), "X-Shopify-Shop-Domain");
/// ```
#[derive(Clone, Debug)]
pub struct WebhookConfig {
    secret: WebhookSecret,
    old_secret: Option<WebhookSecret>,
    encoding: SignatureEncoding,
    shop_header: String,
    signature_header: String,
}

impl WebhookConfig {
    /// Creates a configuration with the given secret and default settings.
    #[must_use]
    pub fn new(secret: WebhookSecret) -> Self {
        Self {
            secret,
            old_secret: None,
            encoding: SignatureEncoding::default(),
            shop_header: HEADER_SHOP_DOMAIN.to_string(),
            signature_header: HEADER_HMAC.to_string(),
        }
    }

    /// Creates a new builder for constructing a `WebhookConfig`.
    #[must_use]
    pub fn builder() -> WebhookConfigBuilder {
        WebhookConfigBuilder::new()
    }

    /// Returns the primary signing secret.
    #[must_use]
    pub const fn secret(&self) -> &WebhookSecret {
        &self.secret
    }

    /// Returns the previous signing secret, if configured.
    #[must_use]
    pub const fn old_secret(&self) -> Option<&WebhookSecret> {
        self.old_secret.as_ref()
    }

    /// Returns the signature encoding.
    #[must_use]
    pub const fn encoding(&self) -> SignatureEncoding {
        self.encoding
    }

    /// Returns the name of the header carrying the sender's shop domain.
    #[must_use]
    pub fn shop_header(&self) -> &str {
        &self.shop_header
    }

    /// Returns the name of the header carrying the claimed signature.
    #[must_use]
    pub fn signature_header(&self) -> &str {
        &self.signature_header
    }
}

// Verify WebhookConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebhookConfig>();
};

/// Builder for constructing [`WebhookConfig`] instances.
///
/// The only required field is `secret`.
///
/// # Defaults
///
/// - `encoding`: [`SignatureEncoding::Base64`]
/// - `old_secret`: `None`
/// - `shop_header`: `X-Shopify-Shop-Domain`
/// - `signature_header`: `X-Shopify-Hmac-SHA256`
///
/// # Example
///
/// ```rust
/// use shopify_webhook::{SignatureEncoding, WebhookConfig, WebhookSecret};
///
/// let config = WebhookConfig::builder()
///     .secret(WebhookSecret::new("new-secret").unwrap())
///     .old_secret(WebhookSecret::new("old-secret").unwrap())
///     .encoding(SignatureEncoding::Hex)
///     .signature_header("X-Signature")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.encoding(), SignatureEncoding::Hex);
/// assert_eq!(config.signature_header(), "X-Signature");
/// ```
#[derive(Debug, Default)]
pub struct WebhookConfigBuilder {
    secret: Option<WebhookSecret>,
    old_secret: Option<WebhookSecret>,
    encoding: Option<SignatureEncoding>,
    shop_header: Option<String>,
    signature_header: Option<String>,
}

impl WebhookConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the signing secret (required).
    #[must_use]
    pub fn secret(mut self, secret: WebhookSecret) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Sets the previous signing secret for rotation support.
    #[must_use]
    pub fn old_secret(mut self, secret: WebhookSecret) -> Self {
        self.old_secret = Some(secret);
        self
    }

    /// Sets the signature encoding.
    #[must_use]
    pub const fn encoding(mut self, encoding: SignatureEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Overrides the shop domain header name.
    #[must_use]
    pub fn shop_header(mut self, name: impl Into<String>) -> Self {
        self.shop_header = Some(name.into());
        self
    }

    /// Overrides the signature header name.
    #[must_use]
    pub fn signature_header(mut self, name: impl Into<String>) -> Self {
        self.signature_header = Some(name.into());
        self
    }

    /// Builds the [`WebhookConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `secret` is not set,
    /// or [`ConfigError::InvalidHeaderName`] if an overridden header name is
    /// not a valid HTTP header name.
    pub fn build(self) -> Result<WebhookConfig, ConfigError> {
        let secret = self
            .secret
            .ok_or(ConfigError::MissingRequiredField { field: "secret" })?;

        let shop_header = self
            .shop_header
            .map_or_else(|| Ok(HEADER_SHOP_DOMAIN.to_string()), validate_header_name)?;
        let signature_header = self
            .signature_header
            .map_or_else(|| Ok(HEADER_HMAC.to_string()), validate_header_name)?;

        Ok(WebhookConfig {
            secret,
            old_secret: self.old_secret,
            encoding: self.encoding.unwrap_or_default(),
            shop_header,
            signature_header,
        })
    }
}

// A name that fails here could never be looked up in a `HeaderMap`.
fn validate_header_name(name: String) -> Result<String, ConfigError> {
    match HeaderName::from_bytes(name.as_bytes()) {
        Ok(_) => Ok(name),
        Err(_) => Err(ConfigError::InvalidHeaderName { name }),
    }
}

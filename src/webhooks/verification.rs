//! Webhook signature verification.
//!
//! This module provides the pure signature verifier for incoming Shopify
//! webhooks. It performs no I/O, holds no state, and never touches a live
//! request; the [`middleware`](crate::middleware) module feeds it the values
//! it extracts from one.
//!
//! # Overview
//!
//! Shopify signs webhook requests using HMAC-SHA256 with the app's shared
//! secret and sends the encoded digest in the `X-Shopify-Hmac-SHA256` header.
//!
//! - [`verify`]: Checks presence of the identity and signature, then the
//!   signature itself, with old-secret fallback for key rotation
//! - [`verify_hmac`]: Low-level single-secret check for custom integrations
//!
//! # Example
//!
//! ```rust
//! use shopify_webhook::webhooks::{verify, RejectionReason, VerificationOutcome};
//! use shopify_webhook::{WebhookConfig, WebhookSecret};
//!
//! let config = WebhookConfig::new(WebhookSecret::new("secret").unwrap());
//! let body = br#"{"key":"value"}"#;
//!
//! let outcome = verify(
//!     &config,
//!     "example.myshopify.com",
//!     "7iASoA8WSbw19M/h+lgrLr2ly/LvgnE9bcLsk9gflvs=",
//!     body,
//! );
//! assert!(outcome.is_accepted());
//!
//! let outcome = verify(&config, "example.myshopify.com", "7iASoA8WSbw19M/h+", body);
//! assert_eq!(outcome.reason(), Some(RejectionReason::SignatureMismatch));
//! ```
//!
//! # Security
//!
//! The claimed signature is decoded and compared with the computed digest in
//! constant time.

use crate::config::{SignatureEncoding, WebhookConfig, WebhookSecret};
use crate::webhooks::hmac::{compute_digest, constant_time_eq};
use crate::webhooks::RejectionReason;

// ============================================================================
// Header Constants
// ============================================================================

/// HTTP header name for the HMAC-SHA256 signature.
///
/// Shopify includes this header in all webhook requests. The value is the
/// encoded HMAC-SHA256 signature of the raw request body.
pub const HEADER_HMAC: &str = "X-Shopify-Hmac-SHA256";

/// HTTP header name for the webhook topic (e.g., "orders/create").
pub const HEADER_TOPIC: &str = "X-Shopify-Topic";

/// HTTP header name for the shop domain.
///
/// Contains the myshopify.com domain of the shop that triggered the webhook
/// (e.g., "example.myshopify.com").
pub const HEADER_SHOP_DOMAIN: &str = "X-Shopify-Shop-Domain";

/// HTTP header name for the API version of the payload format.
pub const HEADER_API_VERSION: &str = "X-Shopify-API-Version";

/// HTTP header name for the unique delivery identifier.
pub const HEADER_WEBHOOK_ID: &str = "X-Shopify-Webhook-Id";

// ============================================================================
// VerificationOutcome
// ============================================================================

/// Result of one verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationOutcome {
    /// The signature matches the body.
    Accepted,
    /// The delivery was rejected for the given reason.
    Rejected(RejectionReason),
}

impl VerificationOutcome {
    /// Returns `true` if the delivery was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Returns the rejection reason, or `None` if accepted.
    #[must_use]
    pub const fn reason(&self) -> Option<RejectionReason> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }

    /// Converts the outcome into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the [`RejectionReason`] if the delivery was rejected.
    pub const fn into_result(self) -> Result<(), RejectionReason> {
        match self {
            Self::Accepted => Ok(()),
            Self::Rejected(reason) => Err(reason),
        }
    }
}

// ============================================================================
// WebhookContext
// ============================================================================

/// Metadata of a webhook delivery that passed verification.
///
/// Returned by [`authenticate`](crate::middleware::authenticate). Only the
/// shop domain is guaranteed; the other headers are optional and passed
/// through as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookContext {
    shop_domain: String,
    topic: Option<String>,
    api_version: Option<String>,
    webhook_id: Option<String>,
}

impl WebhookContext {
    pub(crate) const fn new(
        shop_domain: String,
        topic: Option<String>,
        api_version: Option<String>,
        webhook_id: Option<String>,
    ) -> Self {
        Self {
            shop_domain,
            topic,
            api_version,
            webhook_id,
        }
    }

    /// Returns the shop domain that sent the webhook.
    #[must_use]
    pub fn shop_domain(&self) -> &str {
        &self.shop_domain
    }

    /// Returns the raw topic string, if present.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Returns the API version, if present.
    #[must_use]
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Returns the webhook delivery ID, if present.
    #[must_use]
    pub fn webhook_id(&self) -> Option<&str> {
        self.webhook_id.as_deref()
    }
}

// ============================================================================
// Verification Functions
// ============================================================================

/// Checks that both required header values are present.
///
/// The identity is checked first so that a misconfigured sender is reported
/// as such even when it also omits the signature.
pub(crate) const fn check_presence(
    shop_domain: &str,
    claimed_signature: &str,
) -> Result<(), RejectionReason> {
    if shop_domain.is_empty() {
        return Err(RejectionReason::MissingIdentity);
    }
    if claimed_signature.is_empty() {
        return Err(RejectionReason::MissingSignature);
    }
    Ok(())
}

/// Verifies a claimed signature against a body with a single secret.
///
/// The claim is decoded with `encoding`; a claim that does not decode is
/// treated as a mismatch.
///
/// # Example
///
/// ```rust
/// use shopify_webhook::webhooks::verify_hmac;
/// use shopify_webhook::webhooks::hmac::compute_signature;
/// use shopify_webhook::{SignatureEncoding, WebhookSecret};
///
/// let secret = WebhookSecret::new("my-secret-key").unwrap();
/// let hmac = compute_signature(b"payload", &secret, SignatureEncoding::Hex);
///
/// assert!(verify_hmac(b"payload", &hmac, &secret, SignatureEncoding::Hex));
/// assert!(!verify_hmac(b"payload", &hmac, &secret, SignatureEncoding::Base64));
/// ```
#[must_use]
pub fn verify_hmac(
    raw_body: &[u8],
    claimed_signature: &str,
    secret: &WebhookSecret,
    encoding: SignatureEncoding,
) -> bool {
    let Some(claimed) = encoding.decode(claimed_signature) else {
        return false;
    };
    let expected = compute_digest(raw_body, secret);
    constant_time_eq(&expected, &claimed)
}

/// Verifies a webhook delivery.
///
/// Checks, in order: the shop domain is non-empty, the claimed signature is
/// non-empty, and the claimed signature matches the HMAC-SHA256 of `raw_body`
/// under the configured secret and encoding. If the primary secret does not
/// match and an old secret is configured, the old secret is tried.
///
/// The same inputs always produce the same outcome.
#[must_use]
pub fn verify(
    config: &WebhookConfig,
    shop_domain: &str,
    claimed_signature: &str,
    raw_body: &[u8],
) -> VerificationOutcome {
    if let Err(reason) = check_presence(shop_domain, claimed_signature) {
        return VerificationOutcome::Rejected(reason);
    }

    let encoding = config.encoding();
    let mut verified = verify_hmac(raw_body, claimed_signature, config.secret(), encoding);

    if !verified {
        if let Some(old_secret) = config.old_secret() {
            verified = verify_hmac(raw_body, claimed_signature, old_secret, encoding);
        }
    }

    if verified {
        VerificationOutcome::Accepted
    } else {
        VerificationOutcome::Rejected(RejectionReason::SignatureMismatch)
    }
}

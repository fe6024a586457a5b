//! HMAC-SHA256 primitives for webhook signatures.
//!
//! This module computes webhook signatures and compares digests without
//! leaking timing information.
//!
//! # Security
//!
//! All digest comparisons use constant-time comparison to prevent timing
//! attacks. Comparisons happen on decoded digest bytes, never on the encoded
//! header strings.
//!
//! # Example
//!
//! ```rust
//! use shopify_webhook::webhooks::hmac::compute_signature;
//! use shopify_webhook::{SignatureEncoding, WebhookSecret};
//!
//! let secret = WebhookSecret::new("secret").unwrap();
//! let signature = compute_signature(br#"{"key":"value"}"#, &secret, SignatureEncoding::Base64);
//! assert_eq!(signature, "7iASoA8WSbw19M/h+lgrLr2ly/LvgnE9bcLsk9gflvs=");
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::{SignatureEncoding, WebhookSecret};

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of an HMAC-SHA256 digest.
pub const DIGEST_LEN: usize = 32;

/// Computes the raw HMAC-SHA256 digest of `message` keyed with `secret`.
///
/// The message is hashed exactly as given; no UTF-8 interpretation or
/// normalization takes place.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_digest(message: &[u8], secret: &WebhookSecret) -> [u8; DIGEST_LEN] {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    mac.finalize().into_bytes().into()
}

/// Computes the signature a sender would put in the signature header.
///
/// # Example
///
/// ```rust
/// use shopify_webhook::webhooks::hmac::compute_signature;
/// use shopify_webhook::{SignatureEncoding, WebhookSecret};
///
/// let secret = WebhookSecret::new("secret").unwrap();
/// let sig = compute_signature(b"payload", &secret, SignatureEncoding::Hex);
/// assert_eq!(sig.len(), 64);
/// ```
#[must_use]
pub fn compute_signature(
    message: &[u8],
    secret: &WebhookSecret,
    encoding: SignatureEncoding,
) -> String {
    encoding.encode(&compute_digest(message, secret))
}

/// Performs constant-time comparison of two byte slices.
///
/// Slices of different lengths compare unequal.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

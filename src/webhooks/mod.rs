//! Signature verification for Shopify webhooks.
//!
//! This module contains the framework-independent core: computing HMAC
//! signatures, verifying a claimed signature against a raw body, and the
//! error taxonomy shared with the request adapter.
//!
//! # Overview
//!
//! - [`verify`]: Verifies a delivery and returns a [`VerificationOutcome`]
//! - [`verify_hmac`]: Low-level single-secret signature check
//! - [`hmac`]: Digest computation and constant-time comparison
//! - [`RejectionReason`]: Why a delivery was rejected
//! - [`WebhookError`]: Request-level errors raised by the adapter
//! - [`WebhookContext`]: Metadata of a verified delivery
//!
//! # Error Handling
//!
//! ```rust
//! use shopify_webhook::webhooks::{RejectionReason, WebhookError};
//!
//! fn describe(error: &WebhookError) -> &'static str {
//!     match error.reason() {
//!         Some(RejectionReason::MissingIdentity) => "sender did not identify itself",
//!         Some(RejectionReason::MissingSignature) => "sender did not sign the request",
//!         Some(RejectionReason::SignatureMismatch) => "signature check failed",
//!         None => "request body could not be read",
//!     }
//! }
//! # let error = RejectionReason::MissingSignature.into();
//! # assert_eq!(describe(&error), "sender did not sign the request");
//! ```
//!
//! # Thread Safety
//!
//! Verification is stateless. All types in this module are `Send + Sync`.

mod errors;
pub mod hmac;
mod verification;

pub use errors::{BodyReadError, BoxError, RejectionReason, WebhookError};
pub use verification::{
    verify, verify_hmac, VerificationOutcome, WebhookContext, HEADER_API_VERSION, HEADER_HMAC,
    HEADER_SHOP_DOMAIN, HEADER_TOPIC, HEADER_WEBHOOK_ID,
};

pub(crate) use verification::check_presence;

//! Webhook-specific error types.
//!
//! This module contains the rejection reasons produced by the signature
//! verifier and the errors produced by the request adapter.
//!
//! # Error Handling
//!
//! - [`RejectionReason::MissingIdentity`]: The shop domain header is absent or empty
//! - [`RejectionReason::MissingSignature`]: The signature header is absent or empty
//! - [`RejectionReason::SignatureMismatch`]: The signature does not match the body
//! - [`WebhookError::UnreadableBody`]: The request body could not be read
//!
//! Every variant maps to `400 Bad Request`. None of them is fatal to the
//! host server.
//!
//! # Example
//!
//! ```rust
//! use shopify_webhook::webhooks::{RejectionReason, WebhookError};
//!
//! let error = WebhookError::from(RejectionReason::MissingSignature);
//! assert_eq!(error.status_code(), http::StatusCode::BAD_REQUEST);
//! assert_eq!(error.message(), "missing signature");
//! ```

use http::StatusCode;
use thiserror::Error;

/// Boxed error type used for body read failures from arbitrary HTTP stacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why the signature verifier rejected a delivery.
///
/// `SignatureMismatch` deliberately covers forged payloads as well as a
/// wrong secret or encoding, so a caller learns nothing about which one
/// occurred.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// The shop domain header is absent or empty.
    #[error("missing shop")]
    MissingIdentity,

    /// The signature header is absent or empty.
    #[error("missing signature")]
    MissingSignature,

    /// The claimed signature does not match the computed one.
    #[error("invalid webhook signature")]
    SignatureMismatch,
}

/// The request body could not be read.
#[derive(Debug, Error)]
#[error("failed to read request body: {source}")]
pub struct BodyReadError {
    source: BoxError,
}

impl BodyReadError {
    /// Wraps the underlying body error.
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Error type for authenticating an incoming webhook request.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The signature verifier rejected the delivery.
    #[error(transparent)]
    Rejected(#[from] RejectionReason),

    /// The body could not be read, so no signature could be computed.
    #[error(transparent)]
    UnreadableBody(#[from] BodyReadError),
}

impl WebhookError {
    /// Returns the HTTP status to respond with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Returns the short plain-text message for the response body.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Rejected(RejectionReason::MissingIdentity) => "missing shop",
            Self::Rejected(RejectionReason::MissingSignature) => "missing signature",
            Self::Rejected(RejectionReason::SignatureMismatch) => "invalid webhook signature",
            Self::UnreadableBody(_) => "unreadable request body",
        }
    }

    /// Returns the verifier's rejection reason, if this is a rejection.
    #[must_use]
    pub const fn reason(&self) -> Option<RejectionReason> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            Self::UnreadableBody(_) => None,
        }
    }
}

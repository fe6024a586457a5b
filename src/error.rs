//! Error types for webhook verification configuration.
//!
//! This module contains the error type returned when building or validating
//! configuration values.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation at startup. A misconfigured secret is never reported
//! as a per-request failure.
//!
//! # Example
//!
//! ```rust
//! use shopify_webhook::{ConfigError, WebhookSecret};
//!
//! let result = WebhookSecret::new("");
//! assert!(matches!(result, Err(ConfigError::EmptySecret)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring webhook verification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Webhook secret cannot be empty.
    #[error("Webhook secret cannot be empty. Please provide the Shopify app's shared secret.")]
    EmptySecret,

    /// Signature encoding is not recognized.
    #[error("Invalid signature encoding '{encoding}'. Expected 'base64' or 'hex'.")]
    InvalidSignatureEncoding {
        /// The encoding string that was provided.
        encoding: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. It must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A configured header name is not a valid HTTP header name.
    #[error("Invalid header name '{name}'. Header names must be non-empty HTTP tokens.")]
    InvalidHeaderName {
        /// The header name that was provided.
        name: String,
    },
}

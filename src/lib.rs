//! # Shopify Webhook Verification
//!
//! Verifies that incoming Shopify webhook requests were signed with the
//! app's shared secret, and guards request handlers so that only verified
//! deliveries reach them.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`WebhookConfig`] and [`WebhookConfigBuilder`]
//! - A validated [`WebhookSecret`] that never appears in debug output
//! - A pure verifier, [`verify`], over a shop domain, claimed signature and raw body
//! - HMAC-SHA256 helpers in [`webhooks::hmac`] with constant-time comparison
//! - A request adapter, [`authenticate`], over any type implementing [`WebhookRequest`]
//! - Handler wrapping via [`webhook_verify`], a tower layer via
//!   [`VerifyWebhookLayer`] and an axum middleware via
//!   [`middleware::axum::verify_webhook`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_webhook::{verify, WebhookConfig, WebhookSecret};
//!
//! let config = WebhookConfig::new(WebhookSecret::new("secret").unwrap());
//!
//! let outcome = verify(
//!     &config,
//!     "example.myshopify.com",
//!     "7iASoA8WSbw19M/h+lgrLr2ly/LvgnE9bcLsk9gflvs=",
//!     br#"{"key":"value"}"#,
//! );
//! assert!(outcome.is_accepted());
//! ```
//!
//! ## Key Rotation
//!
//! While rotating the shared secret, configure the previous one as the old
//! secret. Deliveries signed with either secret are accepted:
//!
//! ```rust
//! use shopify_webhook::{WebhookConfig, WebhookSecret};
//!
//! let config = WebhookConfig::builder()
//!     .secret(WebhookSecret::new("new-secret").unwrap())
//!     .old_secret(WebhookSecret::new("secret").unwrap())
//!     .build()
//!     .unwrap();
//! # assert!(shopify_webhook::verify(
//! #     &config,
//! #     "example.myshopify.com",
//! #     "7iASoA8WSbw19M/h+lgrLr2ly/LvgnE9bcLsk9gflvs=",
//! #     br#"{"key":"value"}"#,
//! # ).is_accepted());
//! ```
//!
//! ## Guarding a Tower Service
//!
//! ```rust
//! use std::convert::Infallible;
//!
//! use bytes::Bytes;
//! use http::{Request, Response, StatusCode};
//! use http_body_util::Full;
//! use shopify_webhook::{VerifyWebhookLayer, WebhookConfig, WebhookSecret};
//! use tower::{service_fn, ServiceBuilder, ServiceExt};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let config = WebhookConfig::new(WebhookSecret::new("secret").unwrap());
//! let service = ServiceBuilder::new()
//!     .layer(VerifyWebhookLayer::new(config))
//!     .service(service_fn(|_request: Request<Full<Bytes>>| async {
//!         Ok::<_, Infallible>(Response::new(Full::<Bytes>::from("Ok")))
//!     }));
//!
//! let request = Request::post("/webhooks")
//!     .header("X-Shopify-Shop-Domain", "example.myshopify.com")
//!     .body(Full::from(r#"{"key":"value"}"#))
//!     .unwrap();
//!
//! let response = service.oneshot(request).await.unwrap();
//! assert_eq!(response.status(), StatusCode::BAD_REQUEST);
//! # });
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Secrets and encodings validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Body-preserving**: Handlers read exactly the bytes that were verified
//! - **Constant-time**: Signatures are compared without early exit

pub mod config;
pub mod error;
pub mod middleware;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use config::{SignatureEncoding, WebhookConfig, WebhookConfigBuilder, WebhookSecret};
pub use error::ConfigError;

// Re-export the verifier
pub use webhooks::{
    verify, verify_hmac, RejectionReason, VerificationOutcome, WebhookContext, WebhookError,
};

// Re-export the request adapter
pub use middleware::{
    authenticate, webhook_verify, VerifyWebhook, VerifyWebhookLayer, WebhookRequest,
    WebhookResponse, WebhookVerify,
};

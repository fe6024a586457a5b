//! Axum middleware for webhook verification.
//!
//! Use [`verify_webhook`] with `axum::middleware::from_fn_with_state`:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use axum::{middleware, routing::post, Router};
//! use shopify_webhook::middleware::axum::verify_webhook;
//! use shopify_webhook::{WebhookConfig, WebhookSecret};
//!
//! let config = Arc::new(WebhookConfig::new(WebhookSecret::new("secret").unwrap()));
//!
//! let app: Router = Router::new()
//!     .route("/webhooks", post(|body: String| async move { body }))
//!     .route_layer(middleware::from_fn_with_state(config, verify_webhook));
//! # let _ = app;
//! ```
//!
//! [`VerifyWebhookLayer`](super::VerifyWebhookLayer) also works as an axum
//! layer, since axum routers are tower services.

use std::sync::Arc;

use ::axum::extract::{Request, State};
use ::axum::middleware::Next;
use ::axum::response::{IntoResponse, Response};

use super::authenticate;
use crate::config::WebhookConfig;

/// Verifies the request and runs the rest of the stack only if it passes.
///
/// The verified [`WebhookContext`](crate::webhooks::WebhookContext) is
/// stored in the request extensions, so handlers can extract it with
/// `Extension<WebhookContext>`.
pub async fn verify_webhook(
    State(config): State<Arc<WebhookConfig>>,
    mut request: Request,
    next: Next,
) -> Response {
    let authenticated = authenticate(&config, &mut request).await;
    match authenticated {
        Ok(context) => {
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        Err(error) => (error.status_code(), error.message()).into_response(),
    }
}

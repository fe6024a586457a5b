//! Request adapter that guards handlers with webhook verification.
//!
//! This module connects the [`verify`](crate::webhooks::verify) routine to a
//! live HTTP request. It reads the identity and signature headers, captures
//! the body without destroying it, verifies the signature, and either hands
//! the untouched request to the next handler or short-circuits with
//! `400 Bad Request`.
//!
//! # Capabilities
//!
//! A framework integration provides three capabilities:
//!
//! - [`WebhookRequest::header`]: case-insensitive header lookup
//! - [`WebhookRequest::capture_body`]: read the whole body and put an
//!   identical, unread copy back in place
//! - [`WebhookResponse::rejected`]: build a short-circuit response
//!
//! Implementations for `http::Request<B>` and `http::Response<B>` are
//! provided. The request body must be rebuildable from bytes
//! (`From<Bytes> + Default`), which holds for `http_body_util::Full<Bytes>`
//! and `axum::body::Body`. A streaming body such as hyper's `Incoming` does
//! not qualify on its own; wrap it with `axum::body::Body::new` first.
//!
//! # Adapters
//!
//! - [`authenticate`]: Runs the checks against one request
//! - [`WebhookVerify`]: Wraps any async handler function
//! - [`VerifyWebhookLayer`]: A `tower` layer for service stacks
//! - `axum::verify_webhook`: Middleware for `axum::middleware::from_fn_with_state`
//!   (requires the `axum` feature)
//!
//! # Example
//!
//! ```rust
//! use bytes::Bytes;
//! use http::{Request, Response, StatusCode};
//! use http_body_util::Full;
//! use shopify_webhook::middleware::webhook_verify;
//! use shopify_webhook::{WebhookConfig, WebhookSecret};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let config = WebhookConfig::new(WebhookSecret::new("secret").unwrap());
//! let handler = webhook_verify(config, |_request: Request<Full<Bytes>>| async {
//!     Response::new(Full::<Bytes>::from("Ok"))
//! });
//!
//! let request = Request::post("/webhooks/orders-create")
//!     .header("X-Shopify-Shop-Domain", "example.myshopify.com")
//!     .header("X-Shopify-Hmac-Sha256", "7iASoA8WSbw19M/h+lgrLr2ly/LvgnE9bcLsk9gflvs=")
//!     .body(Full::from(r#"{"key":"value"}"#))
//!     .unwrap();
//!
//! let response = handler.handle(request).await;
//! assert_eq!(response.status(), StatusCode::OK);
//! # });
//! ```

#[cfg(feature = "axum")]
pub mod axum;
mod http_impls;
mod layer;

pub use layer::{VerifyWebhook, VerifyWebhookLayer};

use std::future::Future;
use std::sync::Arc;

use ::http::StatusCode;
use async_trait::async_trait;
use bytes::Bytes;

use crate::config::WebhookConfig;
use crate::webhooks::{
    check_presence, verify, BodyReadError, VerificationOutcome, WebhookContext, WebhookError,
    HEADER_API_VERSION, HEADER_TOPIC, HEADER_WEBHOOK_ID,
};

/// Read access to an incoming webhook request.
///
/// The adapter is the only reader of the original body: `capture_body` must
/// leave a fresh body holding exactly the returned bytes, so that whatever
/// runs afterwards reads the same payload that was verified.
#[async_trait]
pub trait WebhookRequest: Send {
    /// Returns the value of the named header.
    ///
    /// Names compare case-insensitively. Absent headers and values that are
    /// not valid visible ASCII return `None`.
    fn header(&self, name: &str) -> Option<&str>;

    /// Reads the complete body and restores an identical readable body.
    ///
    /// # Errors
    ///
    /// Returns [`BodyReadError`] if the underlying body stream fails.
    async fn capture_body(&mut self) -> Result<Bytes, BodyReadError>;
}

/// Construction of a short-circuit response for rejected requests.
pub trait WebhookResponse {
    /// Builds a response with the given status and plain-text message.
    fn rejected(status: StatusCode, message: &'static str) -> Self;
}

impl<T, E> WebhookResponse for Result<T, E>
where
    T: WebhookResponse,
{
    fn rejected(status: StatusCode, message: &'static str) -> Self {
        Ok(T::rejected(status, message))
    }
}

fn owned_header<R>(request: &R, name: &str) -> Option<String>
where
    R: WebhookRequest + ?Sized,
{
    request.header(name).map(str::to_owned)
}

/// Authenticates one webhook request.
///
/// Runs, in order: header extraction, presence checks (shop domain first,
/// then signature), body capture, and signature verification. A request that
/// fails the presence checks keeps its body unread. A request whose body was
/// captured always has it restored, whether it is accepted or rejected.
///
/// # Errors
///
/// Returns [`WebhookError::Rejected`] if verification fails and
/// [`WebhookError::UnreadableBody`] if the body could not be read. Both map
/// to `400 Bad Request` through [`WebhookError::status_code`].
pub async fn authenticate<R>(
    config: &WebhookConfig,
    request: &mut R,
) -> Result<WebhookContext, WebhookError>
where
    R: WebhookRequest + ?Sized,
{
    let shop_domain = owned_header(request, config.shop_header()).unwrap_or_default();
    let claimed_signature = owned_header(request, config.signature_header()).unwrap_or_default();

    if let Err(reason) = check_presence(&shop_domain, &claimed_signature) {
        tracing::warn!(shop = %shop_domain, %reason, "Rejected webhook request");
        return Err(reason.into());
    }

    let body = request.capture_body().await.map_err(|error| {
        tracing::warn!(shop = %shop_domain, %error, "Failed to read webhook request body");
        WebhookError::from(error)
    })?;

    if let VerificationOutcome::Rejected(reason) =
        verify(config, &shop_domain, &claimed_signature, &body)
    {
        tracing::warn!(shop = %shop_domain, %reason, "Rejected webhook request");
        return Err(reason.into());
    }

    let context = WebhookContext::new(
        shop_domain,
        owned_header(request, HEADER_TOPIC),
        owned_header(request, HEADER_API_VERSION),
        owned_header(request, HEADER_WEBHOOK_ID),
    );

    tracing::debug!(
        shop = context.shop_domain(),
        topic = context.topic(),
        webhook_id = context.webhook_id(),
        "Verified webhook request"
    );

    Ok(context)
}

/// A handler guarded by webhook verification.
///
/// Calls the wrapped `next` handler only for requests that pass
/// [`authenticate`]; every other request gets a `400` response built through
/// [`WebhookResponse::rejected`] and `next` is never invoked.
#[derive(Clone)]
pub struct WebhookVerify<H> {
    config: Arc<WebhookConfig>,
    next: H,
}

impl<H> WebhookVerify<H> {
    /// Wraps `next` with verification using `config`.
    pub fn new(config: impl Into<Arc<WebhookConfig>>, next: H) -> Self {
        Self {
            config: config.into(),
            next,
        }
    }

    /// Returns the verification configuration.
    #[must_use]
    pub const fn config(&self) -> &Arc<WebhookConfig> {
        &self.config
    }

    /// Handles one request.
    pub async fn handle<R, Fut>(&self, mut request: R) -> Fut::Output
    where
        R: WebhookRequest,
        H: Fn(R) -> Fut,
        Fut: Future,
        Fut::Output: WebhookResponse,
    {
        let authenticated = authenticate(&self.config, &mut request).await;
        match authenticated {
            Ok(_) => (self.next)(request).await,
            Err(error) => {
                <Fut::Output as WebhookResponse>::rejected(error.status_code(), error.message())
            }
        }
    }
}

/// Wraps `next` so that it only runs for verified webhook requests.
///
/// Shorthand for [`WebhookVerify::new`].
pub fn webhook_verify<H>(config: impl Into<Arc<WebhookConfig>>, next: H) -> WebhookVerify<H> {
    WebhookVerify::new(config, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SignatureEncoding, WebhookSecret};
    use crate::webhooks::RejectionReason;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BODY: &[u8] = br#"{"key":"value"}"#;
    const SHOP: &str = "example.store.example";
    const BASE64_SIG: &str = "7iASoA8WSbw19M/h+lgrLr2ly/LvgnE9bcLsk9gflvs=";

    /// Minimal in-memory request used to exercise the capability contract.
    struct MemoryRequest {
        headers: Vec<(String, String)>,
        body: Vec<u8>,
        captures: usize,
        fail_read: bool,
    }

    impl MemoryRequest {
        fn new(shop: &str, signature: &str, body: &[u8]) -> Self {
            Self {
                headers: vec![
                    ("x-shopify-shop-domain".to_string(), shop.to_string()),
                    ("x-shopify-hmac-sha256".to_string(), signature.to_string()),
                ],
                body: body.to_vec(),
                captures: 0,
                fail_read: false,
            }
        }
    }

    #[async_trait]
    impl WebhookRequest for MemoryRequest {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        }

        async fn capture_body(&mut self) -> Result<Bytes, BodyReadError> {
            self.captures += 1;
            if self.fail_read {
                return Err(BodyReadError::new(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "connection reset",
                )));
            }
            Ok(Bytes::copy_from_slice(&self.body))
        }
    }

    #[derive(Debug, PartialEq)]
    struct MemoryResponse {
        status: StatusCode,
        message: &'static str,
    }

    impl WebhookResponse for MemoryResponse {
        fn rejected(status: StatusCode, message: &'static str) -> Self {
            Self { status, message }
        }
    }

    fn config() -> WebhookConfig {
        WebhookConfig::new(WebhookSecret::new("secret").unwrap())
    }

    // ========================================================================
    // authenticate Tests
    // ========================================================================

    #[tokio::test]
    async fn test_authenticate_accepts_valid_request() {
        let mut request = MemoryRequest::new(SHOP, BASE64_SIG, BODY);
        request
            .headers
            .push(("X-Shopify-Topic".to_string(), "orders/create".to_string()));

        let context = authenticate(&config(), &mut request).await.unwrap();

        assert_eq!(context.shop_domain(), SHOP);
        assert_eq!(context.topic(), Some("orders/create"));
        assert_eq!(context.webhook_id(), None);
        assert_eq!(request.captures, 1);
    }

    #[tokio::test]
    async fn test_authenticate_missing_shop_leaves_body_unread() {
        let mut request = MemoryRequest::new("", BASE64_SIG, BODY);

        let error = authenticate(&config(), &mut request).await.unwrap_err();

        assert_eq!(error.reason(), Some(RejectionReason::MissingIdentity));
        assert_eq!(request.captures, 0);
    }

    #[tokio::test]
    async fn test_authenticate_missing_signature_leaves_body_unread() {
        let mut request = MemoryRequest::new(SHOP, "", BODY);

        let error = authenticate(&config(), &mut request).await.unwrap_err();

        assert_eq!(error.reason(), Some(RejectionReason::MissingSignature));
        assert_eq!(request.captures, 0);
    }

    #[tokio::test]
    async fn test_authenticate_treats_absent_header_as_missing() {
        let mut request = MemoryRequest::new(SHOP, BASE64_SIG, BODY);
        request.headers.retain(|(name, _)| name != "x-shopify-shop-domain");

        let error = authenticate(&config(), &mut request).await.unwrap_err();

        assert_eq!(error.reason(), Some(RejectionReason::MissingIdentity));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_mismatch() {
        let mut request = MemoryRequest::new(SHOP, "7iASoA8WSbw19M/h+", BODY);

        let error = authenticate(&config(), &mut request).await.unwrap_err();

        assert_eq!(error.reason(), Some(RejectionReason::SignatureMismatch));
        assert_eq!(request.captures, 1);
    }

    #[tokio::test]
    async fn test_authenticate_reports_unreadable_body() {
        let mut request = MemoryRequest::new(SHOP, BASE64_SIG, BODY);
        request.fail_read = true;

        let error = authenticate(&config(), &mut request).await.unwrap_err();

        assert!(matches!(error, WebhookError::UnreadableBody(_)));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "unreadable request body");
    }

    #[tokio::test]
    async fn test_authenticate_uses_configured_headers_and_encoding() {
        let config = WebhookConfig::builder()
            .secret(WebhookSecret::new("secret").unwrap())
            .encoding(SignatureEncoding::Hex)
            .shop_header("X-Store")
            .signature_header("X-Signature")
            .build()
            .unwrap();
        let mut request = MemoryRequest {
            headers: vec![
                ("X-STORE".to_string(), SHOP.to_string()),
                (
                    "x-signature".to_string(),
                    "ee2012a00f1649bc35f4cfe1fa582b2ebda5cbf2ef82713d6dc2ec93d81f96fb"
                        .to_string(),
                ),
            ],
            body: BODY.to_vec(),
            captures: 0,
            fail_read: false,
        };

        assert!(authenticate(&config, &mut request).await.is_ok());
    }

    // ========================================================================
    // WebhookVerify Tests
    // ========================================================================

    #[tokio::test]
    async fn test_webhook_verify_runs_next_for_valid_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handler = webhook_verify(config(), move |_request: MemoryRequest| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                MemoryResponse {
                    status: StatusCode::OK,
                    message: "Ok",
                }
            }
        });

        let response = handler
            .handle(MemoryRequest::new(SHOP, BASE64_SIG, BODY))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_webhook_verify_short_circuits_rejections() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handler = webhook_verify(config(), move |_request: MemoryRequest| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                MemoryResponse {
                    status: StatusCode::OK,
                    message: "Ok",
                }
            }
        });

        let cases = [
            (MemoryRequest::new("", BASE64_SIG, BODY), "missing shop"),
            (MemoryRequest::new(SHOP, "", BODY), "missing signature"),
            (
                MemoryRequest::new(SHOP, "7iASoA8WSbw19M/h+", BODY),
                "invalid webhook signature",
            ),
        ];

        for (request, message) in cases {
            let response = handler.handle(request).await;
            assert_eq!(
                response,
                MemoryResponse {
                    status: StatusCode::BAD_REQUEST,
                    message,
                }
            );
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_webhook_verify_clones_share_config() {
        let handler = webhook_verify(config(), |_request: MemoryRequest| async {
            MemoryResponse {
                status: StatusCode::OK,
                message: "Ok",
            }
        });
        let clone = handler.clone();

        assert!(Arc::ptr_eq(handler.config(), clone.config()));
        assert_eq!(handler.config().shop_header(), crate::webhooks::HEADER_SHOP_DOMAIN);
    }

    #[tokio::test]
    async fn test_webhook_verify_rejection_for_fallible_handlers() {
        let handler = webhook_verify(config(), |_request: MemoryRequest| async {
            Ok::<_, io::Error>(MemoryResponse {
                status: StatusCode::OK,
                message: "Ok",
            })
        });

        let response = handler.handle(MemoryRequest::new(SHOP, "", BODY)).await;

        assert_eq!(
            response.unwrap(),
            MemoryResponse {
                status: StatusCode::BAD_REQUEST,
                message: "missing signature",
            }
        );
    }
}

//! Tower layer for webhook verification.
//!
//! Wraps any `tower::Service` that accepts `http::Request<B>` so that only
//! verified webhook requests reach it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use http::{Request, Response};
use http_body::Body;
use tower::{Layer, Service};

use super::{authenticate, WebhookResponse};
use crate::config::WebhookConfig;
use crate::webhooks::BoxError;

/// Layer that applies [`VerifyWebhook`] to a service.
///
/// # Example
///
/// ```rust
/// use std::convert::Infallible;
///
/// use bytes::Bytes;
/// use http::{Request, Response};
/// use http_body_util::Full;
/// use shopify_webhook::middleware::VerifyWebhookLayer;
/// use shopify_webhook::{WebhookConfig, WebhookSecret};
/// use tower::{service_fn, ServiceBuilder};
///
/// let config = WebhookConfig::new(WebhookSecret::new("secret").unwrap());
///
/// let service = ServiceBuilder::new()
///     .layer(VerifyWebhookLayer::new(config))
///     .service(service_fn(|_request: Request<Full<Bytes>>| async {
///         Ok::<_, Infallible>(Response::new(Full::<Bytes>::from("Ok")))
///     }));
/// # let _ = service;
/// ```
#[derive(Clone, Debug)]
pub struct VerifyWebhookLayer {
    config: Arc<WebhookConfig>,
}

impl VerifyWebhookLayer {
    /// Creates a layer verifying requests with `config`.
    pub fn new(config: impl Into<Arc<WebhookConfig>>) -> Self {
        Self {
            config: config.into(),
        }
    }
}

impl<S> Layer<S> for VerifyWebhookLayer {
    type Service = VerifyWebhook<S>;

    fn layer(&self, inner: S) -> Self::Service {
        VerifyWebhook {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

/// Service that verifies webhook requests before calling the inner service.
///
/// Rejected requests are answered with `400 Bad Request` and a plain-text
/// reason; the inner service is not called for them.
///
/// The request body type must be rebuildable from the captured bytes, for
/// example `Full<Bytes>` or `axum::body::Body`. Convert other bodies before
/// this layer, e.g. `axum::body::Body::new(incoming)` for a hyper body.
#[derive(Clone, Debug)]
pub struct VerifyWebhook<S> {
    inner: S,
    config: Arc<WebhookConfig>,
}

impl<S> VerifyWebhook<S> {
    /// Wraps `inner` with verification using `config`.
    pub fn new(inner: S, config: impl Into<Arc<WebhookConfig>>) -> Self {
        Self {
            inner,
            config: config.into(),
        }
    }

    /// Returns a reference to the inner service.
    pub const fn get_ref(&self) -> &S {
        &self.inner
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for VerifyWebhook<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Body<Data = Bytes> + From<Bytes> + Default + Send + 'static,
    ReqBody::Error: Into<BoxError>,
    ResBody: From<&'static str> + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        let config = Arc::clone(&self.config);
        // Take the service that was driven to readiness and leave a fresh clone.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let authenticated = authenticate(&config, &mut request).await;
            match authenticated {
                Ok(_) => inner.call(request).await,
                Err(error) => Ok(Response::rejected(error.status_code(), error.message())),
            }
        })
    }
}

//! Capability implementations for the `http` crate's request and response types.
//!
//! The captured bytes are put back with `B::from(bytes)`, so only bodies that
//! can be rebuilt from a buffer are supported.

use async_trait::async_trait;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Request, Response, StatusCode};
use http_body::Body;
use http_body_util::BodyExt;

use super::{WebhookRequest, WebhookResponse};
use crate::webhooks::{BodyReadError, BoxError};

#[async_trait]
impl<B> WebhookRequest for Request<B>
where
    B: Body<Data = Bytes> + From<Bytes> + Default + Send,
    B::Error: Into<BoxError>,
{
    fn header(&self, name: &str) -> Option<&str> {
        self.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    async fn capture_body(&mut self) -> Result<Bytes, BodyReadError> {
        // On a read failure the request is left holding an empty body.
        let body = std::mem::take(self.body_mut());
        let bytes = body
            .collect()
            .await
            .map_err(BodyReadError::new)?
            .to_bytes();

        *self.body_mut() = B::from(bytes.clone());
        Ok(bytes)
    }
}

impl<B> WebhookResponse for Response<B>
where
    B: From<&'static str>,
{
    fn rejected(status: StatusCode, message: &'static str) -> Self {
        let mut response = Self::new(B::from(message));
        *response.status_mut() = status;
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        response
    }
}

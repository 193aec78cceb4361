//! Outbound HTTP for analytics events.

use reqwest::header::HeaderMap;
use reqwest::Client;
use url::Url;

use crate::error::DeliveryError;

/// A fully prepared POST: target, headers and JSON body.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Sends one prepared request. Success means the endpoint answered with a
/// 2xx status; the response body is never read.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<(), DeliveryError>;
}

/// `reqwest` transport (`fetch` in the browser).
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client, e.g. one with a request timeout.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl Transport for HttpTransport {
    async fn send(&self, request: OutboundRequest) -> Result<(), DeliveryError> {
        let resp = self
            .client
            .post(request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DeliveryError::Status {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

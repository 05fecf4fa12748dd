use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::info;

use crate::common::errors::ProxyError;
use crate::proxy::envelope::OutboundRequest;

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    /// Time from sending the request to receiving the response head.
    pub elapsed: Duration,
    pub text: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends an outbound request and reads the whole response.
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, request: OutboundRequest) -> Result<UpstreamResponse, ProxyError>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpForwarder {
    client: reqwest::Client,
}

impl HttpForwarder {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, request: OutboundRequest) -> Result<UpstreamResponse, ProxyError> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let started = Instant::now();
        let response = builder.send().await?;
        let elapsed = started.elapsed();

        let status = response.status().as_u16();
        info!("Target {} answered {} in {:?}", request.url, status, elapsed);

        let text = response.text().await?;

        Ok(UpstreamResponse {
            status,
            elapsed,
            text,
        })
    }
}

use crate::domain::ports::{HttpResponse, HttpTransport};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use tracing::debug;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the HTTP client used for raw-content downloads.
    ///
    /// No retry middleware and no request timeout: a failed download
    /// surfaces once, and slow responses are bounded only by the network.
    pub fn create_client() -> ClientWithMiddleware {
        let client = Client::builder()
            .pool_max_idle_per_host(2)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        ClientBuilder::new(client).build()
    }
}

/// [`HttpTransport`] backed by reqwest
#[derive(Clone)]
pub struct ReqwestTransport {
    client: ClientWithMiddleware,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::with_client(HttpClientFactory::create_client())
    }

    pub fn with_client(client: ClientWithMiddleware) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;

        let status = response.status();
        debug!("GET {} -> {}", url, status);

        // The body of a failed response is never read
        if !status.is_success() {
            return Ok(HttpResponse::new(status.as_u16(), String::new()));
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;

        Ok(HttpResponse::new(status.as_u16(), body))
    }
}

use crate::domain::ports::{HttpResponse, HttpTransport};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
enum MockRoute {
    Respond(HttpResponse),
    Fail(String),
}

/// In-memory [`HttpTransport`] keyed by full URL.
///
/// Unknown URLs answer 404, like a missing file on the raw-content host.
#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<String, MockRoute>>>,
    requests: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.route(url, MockRoute::Respond(HttpResponse::new(200, body)))
    }

    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.route(url, MockRoute::Respond(HttpResponse::new(status, "")))
    }

    pub fn with_failure(self, url: impl Into<String>, reason: impl Into<String>) -> Self {
        self.route(url, MockRoute::Fail(reason.into()))
    }

    /// Every response waits this long first
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn route(self, url: impl Into<String>, route: MockRoute) -> Self {
        self.routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.into(), route);
        self
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let route = self
            .routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(url)
            .cloned();

        match route {
            Some(MockRoute::Respond(response)) => Ok(response),
            Some(MockRoute::Fail(reason)) => anyhow::bail!("{}", reason),
            None => {
                info!("MockTransport: no route for {}", url);
                Ok(HttpResponse::new(404, ""))
            }
        }
    }
}

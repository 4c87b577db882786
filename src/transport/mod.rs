//! HTTP collaborator seam: one request out, parsed JSON back
//!
//! The transport never interprets envelopes. Non-2xx statuses are not
//! failures here either; their bodies still carry an envelope worth
//! classifying, so they are parsed and handed up like any other response.
//! Only connection-level faults and non-JSON bodies surface as errors.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Connection-level failures from the HTTP collaborator.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("response body is not JSON: {0}")]
    Body(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// One outbound HTTP call, fully described by the profile that built it.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub basic_auth: Option<(String, String)>,
}

/// The HTTP client collaborator. Implementations return the parsed JSON
/// payload or a connection-level fault.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: HttpRequest) -> Result<Value, TransportError>;
}

/// reqwest-backed transport used by all real clients.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Wrap an existing client (custom timeout, proxy, pool settings).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: HttpRequest) -> Result<Value, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some((user, password)) = &request.basic_auth {
            builder = builder.basic_auth(user, Some(password));
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let text = builder.send().await?.text().await?;
        serde_json::from_str(&text).map_err(|_| TransportError::Body(preview(&text)))
    }
}

/// First line of a non-JSON body, truncated, for error messages.
fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or("");
    let mut preview: String = line.chars().take(120).collect();
    if preview.len() < line.len() {
        preview.push_str("...");
    }
    preview
}

//! HTTP seam between `LlmClient` and the provider. One POST per call.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// Network-level failure reaching the provider (DNS, connect, TLS, body read).
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        // without_url: the Gemini URL carries the API key.
        TransportError(e.without_url().to_string())
    }
}

/// A fully-built provider call. `url` may contain credentials; never log it.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub url: String,
    pub bearer_token: Option<String>,
    pub body: serde_json::Value,
}

/// Raw provider answer, passed through uninterpreted.
#[derive(Debug, Clone)]
pub struct ProviderReply {
    pub status: u16,
    /// Header names are lower-cased.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl ProviderReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: OutboundRequest) -> Result<ProviderReply, TransportError>;
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("hirebot-api/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(&self, request: OutboundRequest) -> Result<ProviderReply, TransportError> {
        let mut builder = self.client.post(&request.url).json(&request.body);
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(ProviderReply {
            status,
            headers,
            body,
        })
    }
}

/// LLM Client: the single point of entry for every provider call in HireBot.
///
/// No other module talks to a provider directly. The dialect is chosen once,
/// when the client is built from the resolved `ProviderConfig`.
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use crate::config::{ProviderConfig, PROVIDER_KEY_VARS};

pub mod dialect;
pub mod failure;
pub mod transport;

use dialect::ProviderAdapter;
use transport::{Transport, TransportError};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no LLM provider credential is configured")]
    NotConfigured,

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("provider endpoint not found")]
    EndpointNotFound { hint: &'static str },

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("credential or billing problem (status {status})")]
    Credentials { status: u16 },

    #[error("API error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(&'static str),
}

impl LlmError {
    /// Message shown to clients when no provider is configured.
    pub fn not_configured_message() -> String {
        let vars = PROVIDER_KEY_VARS;
        format!(
            "AI service not configured. Please add {}, {}, {}, or {} to your .env file.",
            vars[0], vars[1], vars[2], vars[3]
        )
    }
}

/// Provider-agnostic generation request produced by the prompt builders.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub user_prompt: String,
    pub temperature: f32,
    /// `None` leaves the output cap to the provider.
    pub max_output_size: Option<u32>,
}

#[derive(Clone)]
struct ActiveProvider {
    config: ProviderConfig,
    adapter: &'static dyn ProviderAdapter,
}

/// Wraps one configured provider behind a `Transport`. One attempt per call, no retries.
#[derive(Clone)]
pub struct LlmClient {
    transport: Arc<dyn Transport>,
    provider: Option<ActiveProvider>,
}

impl LlmClient {
    pub fn new(transport: Arc<dyn Transport>, provider: Option<ProviderConfig>) -> Self {
        let provider = provider.map(|config| ActiveProvider {
            adapter: dialect::adapter_for(config.dialect),
            config,
        });
        Self {
            transport,
            provider,
        }
    }

    /// Sends the request to the configured provider and returns the generated text.
    ///
    /// Fails fast with `NotConfigured` before touching the network when no
    /// provider was resolved. Non-2xx replies are classified by `failure`.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let provider = self.provider.as_ref().ok_or(LlmError::NotConfigured)?;

        let outbound = provider.adapter.build_request(&provider.config, request);
        let reply = self.transport.post(outbound).await.map_err(|e| {
            error!("AI API transport failure ({}): {e}", provider.adapter.name());
            LlmError::from(e)
        })?;

        if !reply.is_success() {
            return Err(failure::classify(provider.adapter, &reply));
        }

        let text = provider.adapter.extract_text(&reply.body)?;
        debug!(
            "LLM call succeeded: dialect={}, model={}, chars={}",
            provider.adapter.name(),
            provider.config.model,
            text.chars().count()
        );
        Ok(text)
    }
}

//! Provider dialects: request wire shapes and response envelopes.
//!
//! `GeminiAdapter`: key in the query string, system + user prompt merged into one part,
//! text at `candidates[0].content.parts[0].text`.
//! `OpenAiAdapter`: bearer auth, system/user messages,
//! text at `choices[0].message.content`.

use serde::{Deserialize, Serialize};

use super::transport::OutboundRequest;
use super::{GenerationRequest, LlmError};
use crate::config::{Dialect, ProviderConfig};

/// Translates a `GenerationRequest` into one provider's wire format and back.
pub trait ProviderAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    fn build_request(&self, provider: &ProviderConfig, request: &GenerationRequest)
        -> OutboundRequest;

    /// Pulls the generated text out of a 2xx body. Missing fields at any level
    /// are `MalformedResponse`.
    fn extract_text(&self, body: &[u8]) -> Result<String, LlmError>;

    /// Advice appended to the 404 message.
    fn not_found_hint(&self) -> &'static str;
}

static GEMINI: GeminiAdapter = GeminiAdapter;
static OPENAI: OpenAiAdapter = OpenAiAdapter;

pub fn adapter_for(dialect: Dialect) -> &'static dyn ProviderAdapter {
    match dialect {
        Dialect::Gemini => &GEMINI,
        Dialect::OpenAiCompatible => &OPENAI,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPartOut<'a>>,
}

#[derive(Serialize)]
struct GeminiPartOut<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    parts: Option<Vec<GeminiPartIn>>,
}

#[derive(Deserialize)]
struct GeminiPartIn {
    text: Option<String>,
}

pub struct GeminiAdapter;

impl ProviderAdapter for GeminiAdapter {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn build_request(
        &self,
        provider: &ProviderConfig,
        request: &GenerationRequest,
    ) -> OutboundRequest {
        let full_prompt = format!("{}\n\n{}", request.system_instruction, request.user_prompt);
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPartOut { text: &full_prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_size,
            },
        };

        OutboundRequest {
            url: format!(
                "{}/models/{}:generateContent?key={}",
                provider.base_url.trim_end_matches('/'),
                provider.model,
                provider.api_key
            ),
            bearer_token: None,
            body: serde_json::json!(body),
        }
    }

    fn extract_text(&self, body: &[u8]) -> Result<String, LlmError> {
        const INVALID: &str = "Invalid Gemini API response format";

        let response: GeminiResponse =
            serde_json::from_slice(body).map_err(|_| LlmError::MalformedResponse(INVALID))?;

        response
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|p| p.into_iter().next())
            .and_then(|p| p.text)
            .map(|t| t.trim().to_string())
            .ok_or(LlmError::MalformedResponse(INVALID))
    }

    fn not_found_hint(&self) -> &'static str {
        "Please check your GEMINI_API_KEY and GEMINI_MODEL (try gemini-1.5-flash or gemini-pro)."
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI-compatible
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

pub struct OpenAiAdapter;

impl ProviderAdapter for OpenAiAdapter {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    fn build_request(
        &self,
        provider: &ProviderConfig,
        request: &GenerationRequest,
    ) -> OutboundRequest {
        let body = ChatRequest {
            model: &provider.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_output_size,
        };

        OutboundRequest {
            url: provider.base_url.clone(),
            bearer_token: Some(provider.api_key.clone()),
            body: serde_json::json!(body),
        }
    }

    fn extract_text(&self, body: &[u8]) -> Result<String, LlmError> {
        const INVALID: &str = "Invalid API response format";

        let response: ChatResponse =
            serde_json::from_slice(body).map_err(|_| LlmError::MalformedResponse(INVALID))?;

        response
            .choices
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|t| t.trim().to_string())
            .ok_or(LlmError::MalformedResponse(INVALID))
    }

    fn not_found_hint(&self) -> &'static str {
        "Please check your API configuration."
    }
}

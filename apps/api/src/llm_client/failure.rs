//! Maps non-2xx provider replies onto `LlmError`. Dialect-independent apart
//! from the 404 hint. Nothing here retries.

use serde::Deserialize;
use tracing::error;

use super::dialect::ProviderAdapter;
use super::transport::ProviderReply;
use super::LlmError;

/// Used when a 429 carries no usable `retry-after` header.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Longest raw body fragment surfaced as an error message.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub fn classify(adapter: &dyn ProviderAdapter, reply: &ProviderReply) -> LlmError {
    let body = reply.body_text();
    error!(
        "AI API error ({}): status={} body={}",
        adapter.name(),
        reply.status,
        truncate(&body)
    );

    match reply.status {
        404 => LlmError::EndpointNotFound {
            hint: adapter.not_found_hint(),
        },
        429 => LlmError::RateLimited {
            retry_after_secs: retry_after(reply),
        },
        401 | 402 => LlmError::Credentials {
            status: reply.status,
        },
        status => LlmError::Upstream {
            status,
            message: upstream_message(status, &body),
        },
    }
}

fn retry_after(reply: &ProviderReply) -> u64 {
    reply
        .header("retry-after")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Provider's `error.message` if the body is such JSON, else the raw body
/// truncated, else a generic status line.
fn upstream_message(status: u16, body: &str) -> String {
    if let Ok(ErrorEnvelope {
        error: Some(ErrorBody {
            message: Some(message),
        }),
    }) = serde_json::from_str::<ErrorEnvelope>(body)
    {
        return message;
    }
    if body.trim().is_empty() {
        return format!("AI API error: {status}");
    }
    truncate(body)
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_ERROR_CHARS).collect()
}

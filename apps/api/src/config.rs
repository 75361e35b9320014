use std::collections::HashMap;

use anyhow::{Context, Result};

const GEMINI_DEFAULT_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";
const OPENAI_DEFAULT_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const LOVABLE_DEFAULT_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
const LOVABLE_DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Credential variables checked by the resolver, in priority order.
pub const PROVIDER_KEY_VARS: [&str; 4] = [
    "GEMINI_API_KEY",
    "OPENAI_API_KEY",
    "LOVABLE_API_KEY",
    "AI_API_KEY",
];

/// Application configuration loaded from environment variables.
/// Read once in `main` and handed to `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Single allowed CORS origin. `None` means permissive CORS.
    pub frontend_url: Option<String>,
    /// Bearer token -> user id, consumed by `StaticTokenVerifier`.
    pub auth_tokens: HashMap<String, String>,
    /// `None` when no provider credential is configured; generation is disabled.
    pub provider: Option<ProviderConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let lookup = |key: &str| std::env::var(key).ok();

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            frontend_url: non_empty(&lookup, "FRONTEND_URL"),
            auth_tokens: parse_auth_tokens(&std::env::var("AUTH_TOKENS").unwrap_or_default()),
            provider: ProviderConfig::resolve(lookup),
        })
    }
}

/// Wire format spoken by the configured LLM provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Gemini,
    OpenAiCompatible,
}

/// The one LLM provider this process talks to. Immutable after startup.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub dialect: Dialect,
    /// Name of the environment variable the credential came from.
    pub source: &'static str,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

// The key must never reach the logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("dialect", &self.dialect)
            .field("source", &self.source)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl ProviderConfig {
    /// Picks the first configured credential source.
    ///
    /// Order: `GEMINI_API_KEY` > `OPENAI_API_KEY` > `LOVABLE_API_KEY` > `AI_API_KEY`.
    /// Endpoint and model fall back to per-source defaults unless overridden.
    /// Returns `None` when no source has a non-blank key.
    pub fn resolve<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = PROVIDER_KEY_VARS
            .into_iter()
            .find(|var| non_empty(&lookup, var).is_some())?;
        let api_key = non_empty(&lookup, source)?;
        let or_default =
            |var: &str, default: &str| non_empty(&lookup, var).unwrap_or_else(|| default.to_string());

        let config = match source {
            "GEMINI_API_KEY" => ProviderConfig {
                dialect: Dialect::Gemini,
                source,
                api_key,
                base_url: or_default("GEMINI_API_URL", GEMINI_DEFAULT_URL),
                model: or_default("GEMINI_MODEL", GEMINI_DEFAULT_MODEL),
            },
            "OPENAI_API_KEY" => ProviderConfig {
                dialect: Dialect::OpenAiCompatible,
                source,
                api_key,
                base_url: or_default("OPENAI_API_URL", OPENAI_DEFAULT_URL),
                model: or_default("AI_MODEL", OPENAI_DEFAULT_MODEL),
            },
            "LOVABLE_API_KEY" => ProviderConfig {
                dialect: Dialect::OpenAiCompatible,
                source,
                api_key,
                base_url: or_default("AI_API_URL", LOVABLE_DEFAULT_URL),
                model: or_default("AI_MODEL", LOVABLE_DEFAULT_MODEL),
            },
            _ => ProviderConfig {
                dialect: Dialect::OpenAiCompatible,
                source,
                api_key,
                base_url: or_default("AI_API_URL", OPENAI_DEFAULT_URL),
                model: or_default("AI_MODEL", OPENAI_DEFAULT_MODEL),
            },
        };

        Some(config)
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses `token:user_id,token:user_id`. Malformed pairs are skipped.
fn parse_auth_tokens(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter_map(|pair| {
            let (token, user) = pair.split_once(':')?;
            let (token, user) = (token.trim(), user.trim());
            (!token.is_empty() && !user.is_empty()).then(|| (token.to_string(), user.to_string()))
        })
        .collect()
}

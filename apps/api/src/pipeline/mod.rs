//! Generation pipeline shared by every AI feature.
//!
//! Flow: build prompt → provider call (`LlmClient`) → structured parse.
//! Features differ only in their `Feature` impl: the prompt builder and the
//! output schema.

pub mod parser;

use anyhow::anyhow;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{GenerationRequest, LlmClient};
use parser::OutputSchema;

/// One AI-backed feature: validated input in, schema-conforming output out.
pub trait Feature {
    /// Already-validated request data.
    type Input: Sync;
    type Output: Send + 'static;

    const NAME: &'static str;
    const SCHEMA: OutputSchema<Self::Output>;

    fn build_request(input: &Self::Input) -> GenerationRequest;
}

/// Runs one feature request end to end. Exactly one provider call.
///
/// Fallback parsing is logged but never surfaced to the client.
pub async fn run<F: Feature>(llm: &LlmClient, input: &F::Input) -> Result<F::Output, AppError> {
    let request = F::build_request(input);
    let text = llm.generate(&request).await?;

    let parsed = F::SCHEMA
        .parse(&text)
        .map_err(|e| AppError::Internal(anyhow!("{} output could not be parsed: {e}", F::NAME)))?;

    if parsed.fallback_applied {
        warn!(
            "{} output was not strictly parseable; recovered with '{}' strategy ({} chars)",
            F::NAME,
            parsed.strategy,
            text.chars().count()
        );
    } else {
        info!("{} output parsed with '{}' strategy", F::NAME, parsed.strategy);
    }

    Ok(parsed.value)
}

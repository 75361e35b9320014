use std::sync::Arc;

use crate::auth::IdentityVerifier;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once from the resolved provider; unconfigured clients reject every call.
    pub llm: LlmClient,
    pub verifier: Arc<dyn IdentityVerifier>,
}

use std::sync::Arc;

use crate::config::{Config, CredentialProvider};
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. Default: `LlmClient` against OpenRouter.
    pub completion: Arc<dyn CompletionClient>,
    /// Re-queried on every request; never cached as a pass/fail flag.
    pub credentials: Arc<dyn CredentialProvider>,
    pub config: Config,
}

mod classifier;
mod client;

use std::sync::Arc;

use tracing::{info, warn};

pub use classifier::{
    classification_prompt, extract_classification, IntentClassifier, IntentPrediction,
    LlmIntentClassifier, RuleIntentClassifier,
};
pub use client::{
    CompletionClient, CompletionRequest, LlmConfig, LlmError, OpenAiCompatClient, SseText,
    DEFAULT_ENDPOINT, DEFAULT_MODEL,
};

/// The language-model pieces a process runs with. Without a client the
/// classifier is rule-only and replies are composed without generation.
#[derive(Clone)]
pub struct LlmStack {
    pub completion: Option<Arc<dyn CompletionClient>>,
    pub classifier: Arc<dyn IntentClassifier>,
}

impl LlmStack {
    pub fn load_default() -> Self {
        match LlmConfig::from_env() {
            Ok(config) => Self::from_config(config),
            Err(err) => {
                info!(reason = %err, "language model disabled");
                Self::rules_only()
            }
        }
    }

    pub fn from_config(config: LlmConfig) -> Self {
        match OpenAiCompatClient::new(config) {
            Ok(client) => Self::with_client(Arc::new(client)),
            Err(err) => {
                warn!(error = %err, "language model client unavailable");
                Self::rules_only()
            }
        }
    }

    pub fn with_client(client: Arc<dyn CompletionClient>) -> Self {
        info!(model = %client.model_name(), "language model enabled");
        Self {
            classifier: Arc::new(LlmIntentClassifier::new(client.clone())),
            completion: Some(client),
        }
    }

    pub fn rules_only() -> Self {
        Self {
            completion: None,
            classifier: Arc::new(RuleIntentClassifier),
        }
    }

    pub fn llm_enabled(&self) -> bool {
        self.completion.is_some()
    }
}

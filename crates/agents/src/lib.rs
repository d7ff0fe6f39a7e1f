pub mod collaborators;
pub mod composer;
pub mod config;
pub mod resolvers;

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::FutureExt;
use serde::Serialize;
use tracing::{error, info, instrument};
use yatra_core::{normalize_text, validate, Intent, Query, ValidationError};
use yatra_fallback::FallbackStore;
use yatra_llm::{IntentClassifier, IntentPrediction, LlmStack};
use yatra_observability::AppMetrics;

pub use collaborators::{CollaboratorClient, CollaboratorError};
pub use composer::ResponseComposer;
pub use config::AssistantConfig;
pub use resolvers::Resolvers;

pub const WELCOME_REPLY: &str = "Hello! I'm your Indian travel assistant. You can ask me about weather, train schedules, road routes, or tourist information about places in India.";
pub const FAREWELL_REPLY: &str = "Goodbye! Have a great day!";
pub const GUIDANCE_REPLY: &str = "I'm sorry, I couldn't understand your request. You can ask me about weather, train schedules, road routes, or tourist information about places in India.";
pub const APOLOGY_REPLY: &str = "I'm sorry, I encountered an error while processing your request. Please try again with a different question.";
pub const HELP_REPLY: &str = r#"I can help you with:
1. Weather information for Indian cities (e.g., "What's the weather in Mumbai?")
2. Train schedules by train number (e.g., "Tell me about train 12345")
3. Train routes between cities (e.g., "Are there trains from Delhi to Mumbai?")
4. Road travel information (e.g., "How long to drive from Bangalore to Chennai?")
5. Tourist information about places (e.g., "Tell me about Jaipur")
6. Best time to visit places (e.g., "When should I visit Goa?")
7. Trip planning (e.g., "I'm planning a trip from Delhi to Agra")

How can I assist you today?"#;

const GREETINGS: &[&str] = &["hi", "hello", "hey"];
const FAREWELLS: &[&str] = &["exit", "quit", "bye"];
const HELP_REQUESTS: &[&str] = &["help", "what can you do", "commands"];

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyOutcome {
    #[serde(flatten)]
    pub prediction: IntentPrediction,
    pub query: Option<Query>,
    pub rejection: Option<String>,
}

#[derive(Clone)]
pub struct TravelAssistant {
    classifier: Arc<dyn IntentClassifier>,
    resolvers: Arc<Resolvers>,
    composer: ResponseComposer,
    metrics: Arc<AppMetrics>,
}

impl TravelAssistant {
    pub fn from_config(
        config: &AssistantConfig,
        llm: LlmStack,
        metrics: Arc<AppMetrics>,
    ) -> Result<Self> {
        let collaborators =
            CollaboratorClient::new(&config.collaborator_url, config.collaborator_timeout)
                .context("failed building collaborator client")?;
        let fallback = match &config.data_dir {
            Some(dir) => FallbackStore::from_dir(dir),
            None => FallbackStore::bundled(),
        };

        let resolvers = Resolvers::new(collaborators, Arc::new(fallback), metrics.clone());
        Ok(Self::new(
            llm.classifier,
            resolvers,
            ResponseComposer::new(llm.completion),
            metrics,
        ))
    }

    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        resolvers: Resolvers,
        composer: ResponseComposer,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            classifier,
            resolvers: Arc::new(resolvers),
            composer,
            metrics,
        }
    }

    pub fn metrics(&self) -> &AppMetrics {
        &self.metrics
    }

    pub fn fallback(&self) -> &FallbackStore {
        self.resolvers.fallback()
    }

    pub fn generative(&self) -> bool {
        self.composer.generative()
    }

    pub async fn handle_message(&self, message: &str) -> String {
        let clean = message.trim();
        let lower = clean.to_lowercase();

        if clean.is_empty() || GREETINGS.contains(&lower.as_str()) {
            return WELCOME_REPLY.to_string();
        }
        if FAREWELLS.contains(&lower.as_str()) {
            return FAREWELL_REPLY.to_string();
        }
        if HELP_REQUESTS.contains(&lower.as_str()) {
            return HELP_REPLY.to_string();
        }
        self.process(clean).await
    }

    #[instrument(skip(self, message))]
    pub async fn process(&self, message: &str) -> String {
        let started = Instant::now();
        self.metrics.inc_request();

        let reply = match AssertUnwindSafe(self.answer(message)).catch_unwind().await {
            Ok(reply) => reply,
            Err(_) => {
                error!("message pipeline panicked");
                APOLOGY_REPLY.to_string()
            }
        };

        self.metrics.observe_latency(started.elapsed());
        reply
    }

    pub async fn classify(&self, message: &str) -> ClassifyOutcome {
        let prediction = self.classifier.predict(&normalize_text(message)).await;
        self.metrics.inc_classification(prediction.model);

        let (query, rejection) = match validate(&prediction.classification) {
            Ok(query) => (Some(query), None),
            Err(err) => (None, Some(err.to_string())),
        };
        ClassifyOutcome {
            prediction,
            query,
            rejection,
        }
    }

    async fn answer(&self, message: &str) -> String {
        let normalized = normalize_text(message);
        let outcome = self.classify(&normalized).await;
        let intent = outcome.prediction.classification.intent;

        if intent == Intent::Unknown {
            info!(model = outcome.prediction.model, "message not understood");
            return GUIDANCE_REPLY.to_string();
        }

        let query = match outcome.query {
            Some(query) => query,
            None => {
                self.metrics.inc_rejected();
                let rejection = outcome
                    .rejection
                    .unwrap_or_else(|| ValidationError::Unrecognized.to_string());
                info!(intent = %intent, reason = %rejection, "parameters rejected");
                return rejection;
            }
        };

        let facts = self.resolvers.facts_for(&query).await;
        let reply = self.composer.compose(message, &facts, intent).await;

        info!(
            intent = %intent,
            model = outcome.prediction.model,
            facts = facts.len(),
            generative = self.composer.generative(),
            "message handled"
        );
        reply
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use yatra_core::{classify_with_rule, Classification};

use crate::client::{CompletionClient, CompletionRequest, LlmError};

const CLASSIFY_TEMPERATURE: f32 = 0.1;
const CLASSIFY_MAX_TOKENS: u32 = 300;

#[derive(Debug, Clone, Serialize)]
pub struct IntentPrediction {
    pub classification: Classification,
    pub model: &'static str,
}

#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn predict(&self, text: &str) -> IntentPrediction;
}

#[derive(Debug, Default)]
pub struct RuleIntentClassifier;

#[async_trait]
impl IntentClassifier for RuleIntentClassifier {
    async fn predict(&self, text: &str) -> IntentPrediction {
        rule_prediction(text)
    }
}

/// Asks the language model first; any failure is answered by the rules.
pub struct LlmIntentClassifier {
    client: Arc<dyn CompletionClient>,
}

impl LlmIntentClassifier {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    async fn ask_model(&self, text: &str) -> Result<Classification, LlmError> {
        let request = CompletionRequest {
            prompt: classification_prompt(text),
            temperature: CLASSIFY_TEMPERATURE,
            max_tokens: CLASSIFY_MAX_TOKENS,
        };
        let output = self.client.complete(&request).await?;
        extract_classification(&output)
    }
}

#[async_trait]
impl IntentClassifier for LlmIntentClassifier {
    async fn predict(&self, text: &str) -> IntentPrediction {
        match self.ask_model(text).await {
            Ok(classification) => {
                info!(
                    model = %self.client.model_name(),
                    intent = %classification.intent,
                    "llm classification succeeded"
                );
                IntentPrediction {
                    classification,
                    model: "llm",
                }
            }
            Err(err) => {
                warn!(error = %err, "llm classification failed, using rules");
                rule_prediction(text)
            }
        }
    }
}

fn rule_prediction(text: &str) -> IntentPrediction {
    let (classification, rule) = classify_with_rule(text);
    info!(
        intent = %classification.intent,
        rule = rule.unwrap_or("none"),
        "rule classification"
    );
    IntentPrediction {
        classification,
        model: "rules",
    }
}

/// The span from the first `{` to the last `}` of the model output, parsed
/// as a flat classification object.
pub fn extract_classification(output: &str) -> Result<Classification, LlmError> {
    let start = output.find('{').ok_or(LlmError::NoJsonObject)?;
    let end = output.rfind('}').ok_or(LlmError::NoJsonObject)?;
    if end < start {
        return Err(LlmError::NoJsonObject);
    }

    let value: Value = serde_json::from_str(&output[start..=end])
        .map_err(|err| LlmError::Json(err.to_string()))?;
    Classification::from_value(&value)
        .ok_or_else(|| LlmError::Json("expected an object".to_string()))
}

pub fn classification_prompt(message: &str) -> String {
    format!(
        r#"User message: "{message}"

Your task is to determine the user's intent and extract relevant parameters. The intent must be one of:
- "weather": User wants to know weather conditions for a specific location
- "train_number": User is asking about a specific train identified by its number
- "train_route": User wants to know about trains between two locations
- "road": User wants information about road travel between two places
- "trip_planning": User wants comprehensive travel information for a trip (multiple modes of transport)
- "place_info": User wants information about a specific place (tourist attractions, etc.)
- "best_time": User wants to know the best time to visit a place
- "unknown": The intent doesn't match any of the above categories

Extract the parameters carefully:
1. For "weather", "place_info", "best_time": Extract "location" (city/place name)
2. For "train_number": Extract "train_number" (5-digit number)
3. For "train_route" or "road": Extract "start" and "end" locations
4. For "trip_planning": Extract "start" and "end" locations

Parse carefully and focus on the actual request. For locations, extract proper nouns or place names.

Output format (JSON):
{{"intent": "one_of_the_intents", ...relevant_parameters}}

Examples:
- "What's the weather like in Mumbai?" → {{"intent":"weather", "location":"Mumbai"}}
- "Tell me about train 12345" → {{"intent":"train_number", "train_number":"12345"}}
- "Are there trains from Delhi to Mumbai?" → {{"intent":"train_route", "start":"Delhi", "end":"Mumbai"}}
- "How long does it take to drive from Bengaluru to Hyderabad?" → {{"intent":"road", "start":"Bengaluru", "end":"Hyderabad"}}
- "I'm planning a trip from Chennai to Kolkata" → {{"intent":"trip_planning", "start":"Chennai", "end":"Kolkata"}}
- "Tell me about attractions in Jaipur" → {{"intent":"place_info", "location":"Jaipur"}}
- "When is the best time to visit Goa?" → {{"intent":"best_time", "location":"Goa"}}

Return only the valid JSON object with one of the specified intents. Nothing else."#
    )
}

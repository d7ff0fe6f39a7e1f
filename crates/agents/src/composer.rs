use std::sync::Arc;

use tracing::warn;
use yatra_core::Intent;
use yatra_llm::{CompletionClient, CompletionRequest};

pub const NO_FACTS_REPLY: &str = "I don't have any information to share on that topic.";

const COMPOSE_TEMPERATURE: f32 = 0.7;
const COMPOSE_MAX_TOKENS: u32 = 800;

#[derive(Clone, Default)]
pub struct ResponseComposer {
    client: Option<Arc<dyn CompletionClient>>,
}

impl ResponseComposer {
    pub fn new(client: Option<Arc<dyn CompletionClient>>) -> Self {
        Self { client }
    }

    pub fn generative(&self) -> bool {
        self.client.is_some()
    }

    pub async fn compose(&self, message: &str, facts: &[String], intent: Intent) -> String {
        if facts.is_empty() {
            return NO_FACTS_REPLY.to_string();
        }
        let Some(client) = &self.client else {
            return render_plain(facts);
        };

        let request = CompletionRequest {
            prompt: composition_prompt(message, facts, intent),
            temperature: COMPOSE_TEMPERATURE,
            max_tokens: COMPOSE_MAX_TOKENS,
        };
        match client.complete(&request).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => render_plain(facts),
            Err(err) => {
                warn!(error = %err, "llm response generation failed");
                render_plain(facts)
            }
        }
    }
}

pub fn render_plain(facts: &[String]) -> String {
    match facts {
        [] => NO_FACTS_REPLY.to_string(),
        [only] => only.clone(),
        _ => format!("Here's what I found:\n\n- {}", facts.join("\n- ")),
    }
}

fn tone_for(intent: Intent) -> &'static str {
    match intent {
        Intent::TripPlanning => "The user is planning a trip. Focus on providing helpful travel advice that covers transportation options, weather conditions, and attraction information in a well-organized way.",
        Intent::PlaceInfo => "The user wants information about a place. Focus on what makes this place special, attractions, and practical tips.",
        Intent::TrainRoute | Intent::TrainNumber => "The user wants train information. Provide clear details about schedules, timings, and any relevant travel tips.",
        Intent::Road => "The user wants road travel information. Provide clear details about travel time, distance, and any relevant driving tips.",
        Intent::Weather | Intent::BestTime | Intent::Unknown => "",
    }
}

pub fn composition_prompt(message: &str, facts: &[String], intent: Intent) -> String {
    format!(
        r#"The user asked: "{message}"

I've collected the following information to answer their question:
{facts}

{tone}

Your task is to create a helpful, conversational response that:
1. Directly addresses the user's query in a personalized way
2. Provides all the relevant information in a natural, well-organized manner
3. Is friendly and helpful, like a knowledgeable travel advisor
4. Includes practical advice where appropriate
5. Organizes information logically if there are multiple parts

Make your response sound natural and engaging, not like you're just reading data.
Do not mention "collected information" or the structure of this prompt in your answer.
Focus on giving the information the user wants in a clear, conversational style."#,
        facts = facts.join(" "),
        tone = tone_for(intent),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use yatra_llm::LlmError;

    struct FixedClient(Result<&'static str, ()>);

    #[async_trait]
    impl CompletionClient for FixedClient {
        fn model_name(&self) -> &str {
            "fixed"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
            self.0.map(str::to_string).map_err(|_| LlmError::EmptyResponse)
        }
    }

    fn facts(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[tokio::test]
    async fn no_facts_means_nothing_to_share() {
        let composer = ResponseComposer::new(Some(Arc::new(FixedClient(Ok("ignored")))));
        assert_eq!(composer.compose("hi", &[], Intent::Weather).await, NO_FACTS_REPLY);
    }

    #[tokio::test]
    async fn without_a_model_facts_render_plainly() {
        let composer = ResponseComposer::default();
        assert_eq!(
            composer.compose("q", &facts(&["Only fact."]), Intent::Road).await,
            "Only fact."
        );
        assert_eq!(
            composer.compose("q", &facts(&["One.", "Two."]), Intent::TripPlanning).await,
            "Here's what I found:\n\n- One.\n- Two."
        );
    }

    #[tokio::test]
    async fn model_text_is_returned_verbatim_unless_blank_or_failed() {
        let generated = ResponseComposer::new(Some(Arc::new(FixedClient(Ok("  Namaste! Pack light.")))));
        assert_eq!(
            generated.compose("q", &facts(&["A.", "B."]), Intent::TripPlanning).await,
            "  Namaste! Pack light."
        );

        for client in [FixedClient(Ok("   ")), FixedClient(Err(()))] {
            let composer = ResponseComposer::new(Some(Arc::new(client)));
            assert_eq!(
                composer.compose("q", &facts(&["A.", "B."]), Intent::Road).await,
                "Here's what I found:\n\n- A.\n- B."
            );
        }
    }

    #[test]
    fn prompt_carries_message_facts_and_tone() {
        let prompt = composition_prompt(
            "trains to Agra?",
            &facts(&["Train 1.", "Train 2."]),
            Intent::TrainRoute,
        );
        assert!(prompt.starts_with("The user asked: \"trains to Agra?\""));
        assert!(prompt.contains("\nTrain 1. Train 2.\n"));
        assert!(prompt.contains("The user wants train information."));
        assert!(!composition_prompt("q", &facts(&["x"]), Intent::Weather).contains("The user wants"));
    }
}

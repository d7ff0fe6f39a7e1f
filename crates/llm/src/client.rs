use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://router.huggingface.co/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const ERROR_BODY_CHARS: usize = 240;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("language model is not configured")]
    NotConfigured,
    #[error("language model request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("language model returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("language model returned no text")]
    EmptyResponse,
    #[error("no JSON object in model output")]
    NoJsonObject,
    #[error("model output is not a usable JSON object: {0}")]
    Json(String),
}

/// One single-turn request: the prompt goes out as the only user message.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    fn model_name(&self) -> &str;

    /// Returns the complete generated text, never an empty string.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

#[derive(Clone)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LlmConfig {
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// `YATRA_LLM_API_KEY` wins over `HF_TOKEN`; without either the model is off.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let non_empty = |name: &str| var(name).filter(|value| !value.trim().is_empty());

        let api_key = non_empty("YATRA_LLM_API_KEY")
            .or_else(|| non_empty("HF_TOKEN"))
            .ok_or(LlmError::NotConfigured)?;

        Ok(Self {
            endpoint: non_empty("YATRA_LLM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key: api_key.trim().to_string(),
            model: non_empty("YATRA_LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(
                non_empty("YATRA_LLM_TIMEOUT_SECONDS")
                    .and_then(|value| value.trim().parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            ),
        })
    }
}

/// Chat-completions client for any OpenAI-compatible endpoint. Responses are
/// requested as a Server-Sent Events stream and concatenated.
pub struct OpenAiCompatClient {
    http: Client,
    config: LlmConfig,
}

impl OpenAiCompatClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompatClient {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let payload = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": request.prompt }],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "stream": true,
        });

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_CHARS).collect(),
            });
        }

        let mut stream = response.bytes_stream();
        let mut events = SseText::default();
        while let Some(chunk) = stream.next().await {
            events.push(&chunk?);
            if events.is_done() {
                break;
            }
        }

        let text = events.finish();
        debug!(model = %self.config.model, chars = text.len(), "completion streamed");
        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Accumulates `choices[0].delta.content` from `data:` lines until
/// `data: [DONE]`. Lines may be split across network chunks.
#[derive(Debug, Default)]
pub struct SseText {
    pending: Vec<u8>,
    text: String,
    done: bool,
}

impl SseText {
    pub fn push(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
        while let Some(newline) = self.pending.iter().position(|byte| *byte == b'\n') {
            let line = self.pending.drain(..=newline).collect::<Vec<_>>();
            self.consume_line(&String::from_utf8_lossy(&line));
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn finish(mut self) -> String {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.consume_line(&String::from_utf8_lossy(&rest));
        }
        self.text
    }

    fn consume_line(&mut self, line: &str) {
        if self.done {
            return;
        }
        let Some(data) = line.trim().strip_prefix("data:") else {
            return;
        };
        let data = data.trim();
        if data == "[DONE]" {
            self.done = true;
            return;
        }

        if let Ok(parsed) = serde_json::from_str::<Value>(data) {
            if let Some(content) = parsed["choices"][0]["delta"]["content"].as_str() {
                self.text.push_str(content);
            }
        }
    }
}

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_COLLABORATOR_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_COLLABORATOR_TIMEOUT_SECONDS: u64 = 5;

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub collaborator_url: String,
    pub collaborator_timeout: Duration,
    pub data_dir: Option<PathBuf>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            collaborator_url: DEFAULT_COLLABORATOR_URL.to_string(),
            collaborator_timeout: Duration::from_secs(DEFAULT_COLLABORATOR_TIMEOUT_SECONDS),
            data_dir: None,
        }
    }
}

impl AssistantConfig {
    pub fn from_env() -> Self {
        let collaborator_url = env::var("YATRA_COLLABORATOR_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COLLABORATOR_URL.to_string());
        let timeout_seconds = env::var("YATRA_COLLABORATOR_TIMEOUT_SECONDS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_COLLABORATOR_TIMEOUT_SECONDS);
        let data_dir = env::var("YATRA_DATA_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Self {
            collaborator_url,
            collaborator_timeout: Duration::from_secs(timeout_seconds),
            data_dir,
        }
    }
}

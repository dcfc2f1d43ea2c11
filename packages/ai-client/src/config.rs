use serde::Deserialize;

/// Connection settings for the chat-completion provider.
///
/// Defaults target Groq's OpenAI-compatible endpoint; any provider speaking
/// the same protocol works by overriding `base_url` and `model`.
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "mixtral-8x7b-32768".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            timeout_secs: 60,
        }
    }
}

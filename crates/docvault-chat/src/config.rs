//! Chat API configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Configuration for the external chat-completions API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f64,
    /// Upper bound on a single generation call, in seconds.
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            api_key: None,
            model: DEFAULT_MODEL.into(),
            max_tokens: 1024,
            temperature: 0.1,
            timeout_secs: 60,
        }
    }
}

impl ChatConfig {
    /// Build configuration from environment variables, defaults otherwise.
    ///
    /// `DOCVAULT_API_URL`, `DOCVAULT_API_KEY` (falls back to
    /// `GROQ_API_KEY`), and `DOCVAULT_MODEL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("DOCVAULT_API_URL") {
            config.api_url = url;
        }
        config.api_key = std::env::var("DOCVAULT_API_KEY")
            .or_else(|_| std::env::var("GROQ_API_KEY"))
            .ok();
        if let Ok(model) = std::env::var("DOCVAULT_MODEL") {
            config.model = model;
        }
        config
    }

    /// Whether an API key is configured at all.
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

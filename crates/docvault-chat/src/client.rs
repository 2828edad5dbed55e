//! Chat-completions client with graceful degradation.
//!
//! All failure modes of the external call (timeout, connection refused,
//! non-200 status, malformed response) map to fixed user-facing messages.
//! The caller never sees an error from this client.

use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use tracing::{debug, error, info};

use crate::config::ChatConfig;
use crate::prompt::build_prompt;
use crate::types::Passage;

/// Returned when retrieval produced no usable context.
pub const NO_CONTEXT_MESSAGE: &str = "I couldn't find specific information about your \
question in the indexed documents. Please contact the document owners directly for \
assistance, or try rephrasing your question.";

pub const TIMEOUT_MESSAGE: &str =
    "I apologize, but the request is taking longer than expected. Please try again later.";

pub const CONNECT_MESSAGE: &str =
    "I apologize, but I'm unable to connect to the service at the moment. Please try again later.";

pub const STATUS_MESSAGE: &str = "I apologize, but I'm having trouble processing your \
request at the moment. Please try again later.";

pub const GENERIC_MESSAGE: &str =
    "I apologize, but I'm experiencing technical difficulties. Please try again in a moment.";

/// Client for the external chat-completions API.
pub struct AnswerClient {
    http: Client,
    config: ChatConfig,
}

impl AnswerClient {
    pub fn new(config: ChatConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { http, config }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Generate an answer grounded in the retrieved passages.
    ///
    /// Empty context short-circuits to the fixed no-context message without
    /// calling the API.
    pub async fn answer(
        &self,
        query: &str,
        passages: &[Passage],
        version_context: &str,
    ) -> String {
        if passages.is_empty() {
            return NO_CONTEXT_MESSAGE.to_string();
        }

        let prompt = build_prompt(query, passages, version_context);
        let response = self.call_api(&prompt).await;
        info!("Generated answer with version-aware context");
        response
    }

    async fn call_api(&self, prompt: &str) -> String {
        let body = json!({
            "messages": [{"role": "user", "content": prompt}],
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "top_p": 0.9,
            "stream": false,
        });

        debug!(
            "Calling {} with prompt of {} chars",
            self.config.api_url,
            prompt.len()
        );

        let response = match self
            .http
            .post(&self.config.api_url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.as_deref().unwrap_or_default()),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                error!("Chat API request timed out");
                return TIMEOUT_MESSAGE.to_string();
            }
            Err(e) if e.is_connect() => {
                error!("Chat API connection error: {}", e);
                return CONNECT_MESSAGE.to_string();
            }
            Err(e) => {
                error!("Chat API call error: {}", e);
                return GENERIC_MESSAGE.to_string();
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Chat API call failed with status {}: {}", status, body);
            return STATUS_MESSAGE.to_string();
        }

        let parsed: serde_json::Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                error!("Chat API returned unreadable body: {}", e);
                return GENERIC_MESSAGE.to_string();
            }
        };

        match parsed["choices"][0]["message"]["content"].as_str() {
            Some(content) => content.trim().to_string(),
            None => {
                error!("Chat API response missing message content");
                GENERIC_MESSAGE.to_string()
            }
        }
    }
}

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::{FlashgenError, Result};

/// Anything that turns a prompt into generated text.
pub trait TextModel {
    fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionResponse {
    /// Trimmed text of the first choice. A missing content field counts as empty text.
    fn into_first_text(self) -> Result<String> {
        let choice = self.choices.into_iter().next().ok_or(FlashgenError::EmptyResponse)?;
        Ok(choice.message.content.unwrap_or_default().trim().to_string())
    }
}

/// Blocking client for an OpenAI-compatible chat completions endpoint.
pub struct ChatClient {
    http: Client,
    timeout: Duration,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    pub fn new(config: &Config, api_key: impl Into<String>) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            timeout,
            endpoint: format!("{}/chat/completions", config.api_base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl TextModel for ChatClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        let req = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(model = %self.model, endpoint = %self.endpoint, "sending chat completion request");
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(FlashgenError::Status {
                status: status.as_u16(),
                body: api_error_message(&body),
            });
        }

        resp.json::<ChatCompletionResponse>()?.into_first_text()
    }
}

/// Pulls `error.message` out of an OpenAI-style error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai";

pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Text-generation backend selectable at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Anthropic,
    Groq,
}

impl Provider {
    /// Human-readable service name used in error messages
    pub fn service_name(&self) -> &'static str {
        match self {
            Provider::Anthropic => "Anthropic",
            Provider::Groq => "Groq",
        }
    }

    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::Groq => "GROQ_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Anthropic => DEFAULT_ANTHROPIC_MODEL,
            Provider::Groq => DEFAULT_GROQ_MODEL,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Anthropic => write!(f, "anthropic"),
            Provider::Groq => write!(f, "groq"),
        }
    }
}

/// Submit one prompt, get one completion back.
///
/// An empty completion is returned as an empty string; only transport, status
/// and auth failures are errors.
#[async_trait]
pub trait Completer: Send + Sync {
    fn provider(&self) -> Provider;

    async fn complete_text(&self, prompt: &str, max_tokens: u32) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

/// Anthropic Messages API backend
#[derive(Debug, Clone)]
pub struct AnthropicCompleter {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicCompleter {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: ANTHROPIC_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicBlock>,
}

#[derive(Debug, Deserialize)]
struct AnthropicBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

fn extract_anthropic_text(resp: AnthropicResponse) -> String {
    match resp.content.into_iter().next() {
        Some(block) if block.kind == "text" => block.text.unwrap_or_default(),
        Some(block) => {
            debug!("First Anthropic content block is {:?}, not text", block.kind);
            String::new()
        }
        None => String::new(),
    }
}

#[async_trait]
impl Completer for AnthropicCompleter {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    async fn complete_text(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        debug!("Requesting completion via Anthropic API with model {}", self.model);

        let body = ChatRequest {
            model: &self.model,
            max_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::provider("Anthropic", e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::provider("Anthropic", format!("{status}: {body}")));
        }

        let parsed: AnthropicResponse = resp
            .json()
            .await
            .map_err(|e| Error::provider("Anthropic", format!("unexpected response format: {e}")))?;
        Ok(extract_anthropic_text(parsed))
    }
}

/// Groq backend, speaking the OpenAI-compatible chat completions API
#[derive(Debug, Clone)]
pub struct GroqCompleter {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqCompleter {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: GROQ_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

fn extract_chat_text(resp: ChatCompletionResponse) -> String {
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .unwrap_or_default()
}

#[async_trait]
impl Completer for GroqCompleter {
    fn provider(&self) -> Provider {
        Provider::Groq
    }

    async fn complete_text(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        debug!("Requesting completion via Groq API with model {}", self.model);

        let body = ChatRequest {
            model: &self.model,
            max_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let resp = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::provider("Groq", e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::provider("Groq", format!("{status}: {body}")));
        }

        let parsed: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| Error::provider("Groq", format!("unexpected response format: {e}")))?;
        Ok(extract_chat_text(parsed))
    }
}

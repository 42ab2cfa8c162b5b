use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::GenerationError;
use crate::domain::prompts::GenerationPrompt;
use crate::domain::suggestions::GenerationResult;

pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.8;
pub const DEFAULT_MAX_TOKENS: u32 = 400;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = "Decor/1.0";

const SYSTEM_PROMPT: &str = "You are a helpful interior designer that returns JSON.";

/// Fixed parameters of every generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Chat-completions endpoint. Defaults to [`OPENAI_CHAT_COMPLETIONS_URL`].
    pub endpoint_url: String,
    /// Model identifier. Defaults to [`DEFAULT_MODEL`].
    pub model: String,
    /// Sampling temperature. Defaults to `0.8`.
    pub temperature: f32,
    /// Output length cap in tokens. Defaults to `400`.
    pub max_tokens: u32,
    /// Deadline for the whole upstream exchange. Defaults to 30 seconds;
    /// expiry is reported as an upstream failure.
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint_url: OPENAI_CHAT_COMPLETIONS_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Send the prompt to the chat-completions endpoint and return the first
/// completion's text (empty when the service returns no content).
///
/// An empty `api_key` fails with [`GenerationError::MissingCredential`]
/// before any request is made.
pub async fn generate(
    client: &reqwest::Client,
    config: &GenerationConfig,
    api_key: &str,
    prompt: &GenerationPrompt,
) -> Result<GenerationResult, GenerationError> {
    if api_key.trim().is_empty() {
        return Err(GenerationError::MissingCredential);
    }

    let request_body = ChatRequest::new(config, prompt);

    let response = client
        .post(&config.endpoint_url)
        .header("User-Agent", USER_AGENT)
        .bearer_auth(api_key)
        .timeout(config.timeout)
        .json(&request_body)
        .send()
        .await
        .map_err(|e| GenerationError::upstream(format!("chat completion request failed: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "(unreadable body)".to_string());
        return Err(GenerationError::upstream(format!(
            "chat completion returned status {status}: {body}"
        )));
    }

    let body = response.text().await.map_err(|e| {
        GenerationError::upstream(format!("failed to read chat completion body: {e}"))
    })?;

    let chat_response: ChatResponse = serde_json::from_str(&body).map_err(|e| {
        GenerationError::upstream(format!("failed to parse chat completion: {e}: {body}"))
    })?;

    Ok(GenerationResult::new(chat_response.first_content()))
}

// --- Chat completion wire types ---

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

impl<'a> ChatRequest<'a> {
    fn new(config: &'a GenerationConfig, prompt: &'a GenerationPrompt) -> Self {
        Self {
            model: &config.model,
            messages: [
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: prompt.as_str(),
                },
            ],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

impl ChatResponse {
    fn first_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

use crate::domain::ports::CompletionClient;
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for the chat-completions API. One user-role prompt in,
/// the first choice's message content out.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    model: String,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn new(api_url: &str, api_key: &str, model: &str, max_tokens: u32) -> Result<Self> {
        let endpoint = Url::parse(&format!(
            "{}/chat/completions",
            api_url.trim_end_matches('/')
        ))
        .map_err(|e| ReportError::ConfigError {
            message: format!("invalid completion API URL '{}': {}", api_url, e),
        })?;

        Ok(Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            endpoint,
            model: model.to_string(),
            max_tokens,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let completion: ChatCompletionResponse = response.json().await?;

        // A response without choices or content counts as empty; the
        // generator decides whether to skip it.
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default();

        Ok(content)
    }
}

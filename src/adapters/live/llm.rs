//! Live adapter for the `LlmClient` port using Azure OpenAI chat completions.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AiSettings;
use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient, PortError};

/// Live LLM client that calls an Azure OpenAI deployment.
pub struct LiveLlmClient {
    client: Client,
    settings: AiSettings,
}

impl LiveLlmClient {
    /// Creates a client for the deployment described by `settings`.
    ///
    /// Every request is bounded by `settings.timeout`; an expired call fails
    /// like any other transport error.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(settings: AiSettings) -> Result<Self, PortError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| -> PortError { format!("Failed to build HTTP client: {e}").into() })?;
        Ok(Self { client, settings })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn body_for(request: &CompletionRequest) -> ChatRequest<'_> {
    ChatRequest {
        messages: [
            ChatMessage { role: "system", content: &request.system },
            ChatMessage { role: "user", content: &request.prompt },
        ],
        response_format: request.structured.then_some(ResponseFormat { kind: "json_object" }),
    }
}

fn parse_response(body: &str) -> Result<CompletionResponse, PortError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| -> PortError { format!("Failed to parse Azure OpenAI response: {e}").into() })?;
    let usage = parsed.usage.unwrap_or(Usage { prompt_tokens: 0, completion_tokens: 0 });
    let text = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();
    Ok(CompletionResponse {
        text,
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
    })
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let url = self.settings.chat_completions_url();
            debug!(deployment = %self.settings.deployment, structured = request.structured, "calling Azure OpenAI");

            let response = self
                .client
                .post(&url)
                .header("api-key", &self.settings.api_key)
                .json(&body_for(&request))
                .send()
                .await
                .map_err(|e| -> PortError {
                    if e.is_timeout() {
                        format!("Azure OpenAI request timed out after {:?}", self.settings.timeout).into()
                    } else {
                        format!("Azure OpenAI request failed: {e}").into()
                    }
                })?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| -> PortError { format!("Failed to read Azure OpenAI response: {e}").into() })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<ApiError>(&text).map(|e| e.error.message).unwrap_or(text);
                return Err(format!("Azure OpenAI error ({}): {msg}", status.as_u16()).into());
            }

            parse_response(&text)
        })
    }
}

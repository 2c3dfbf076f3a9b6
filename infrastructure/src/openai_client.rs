use crate::config::Config;
use domain::ports::{CompletionModel, CompletionRequest, EmbeddingModel};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use shared::types::Result;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{endpoint} returned {status}: {message}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        message: String,
    },

    #[error("{endpoint} returned no {what}")]
    Empty {
        endpoint: &'static str,
        what: &'static str,
    },
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Client for an OpenAI-compatible embeddings + chat completions API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    chat_model: String,
    embedding_model: String,
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        chat_model: impl Into<String>,
        embedding_model: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Arc::new(Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            chat_model: chat_model.into(),
            embedding_model: embedding_model.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.base_url,
            &config.openai_key,
            &config.chat_model,
            &config.embedding_model,
        )
    }

    pub async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/embeddings", self.base_url);
        let request = EmbeddingRequest {
            model: &self.embedding_model,
            input: text,
        };
        debug!(model = %self.embedding_model, text_len = text.len(), "embedding request");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let body = Self::check_status("embeddings", response).await?;
        let parsed: EmbeddingResponse = serde_json::from_str(&body)?;
        let vector = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or(ApiError::Empty {
                endpoint: "embeddings",
                what: "embedding",
            })?;
        Ok(vector)
    }

    pub async fn generate_response(&self, request: CompletionRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.chat_model,
            messages: vec![Message {
                role: "user".to_string(),
                content: request.prompt,
            }],
            temperature: request.temperature,
            stream: false,
        };
        debug!(
            model = %self.chat_model,
            temperature = request.temperature,
            timeout = ?request.timeout,
            "completion request"
        );
        let mut builder = self.client.post(&url).bearer_auth(&self.api_key).json(&body);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        let response = builder.send().await?;
        let text = Self::check_status("chat/completions", response).await?;
        let parsed: ChatResponse = serde_json::from_str(&text)?;
        let choice = parsed.choices.into_iter().next().ok_or(ApiError::Empty {
            endpoint: "chat/completions",
            what: "choices",
        })?;
        Ok(choice.message.content.unwrap_or_default())
    }

    async fn check_status(endpoint: &'static str, response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            error!(endpoint, %status, "API error");
            return Err(ApiError::Status {
                endpoint,
                status,
                message,
            }
            .into());
        }
        Ok(text)
    }
}

impl EmbeddingModel for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.generate_embedding(text).await
    }

    fn model_id(&self) -> &str {
        &self.embedding_model
    }
}

impl CompletionModel for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.generate_response(request).await
    }
}

use shared::types::Result;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

/// Turns a source document into plain text written to `destination`.
pub trait TextExtractor {
    fn extract_to(&self, source: &Path, destination: &Path) -> Result<String>;
}

/// Remote text embedding endpoint.
pub trait EmbeddingModel {
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>>> + Send;

    /// Identifier used to key cached vectors.
    fn model_id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    /// `None` leaves the client default in place.
    pub timeout: Option<Duration>,
}

impl CompletionRequest {
    /// A deterministic-leaning request: temperature 0, no explicit timeout.
    pub fn deterministic(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: 0.0,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Remote language model generating a single non-streamed completion.
pub trait CompletionModel {
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> impl Future<Output = Result<String>> + Send;
}

use domain::ports::{CompletionModel, CompletionRequest, EmbeddingModel};
use domain::prompts::qa_prompt;
use infrastructure::vector_index::InMemoryVectorIndex;
use shared::types::Result;
use tracing::debug;

/// "Stuff" retrieval QA over a single plan's index.
pub struct RetrievalQa<'a, E, C> {
    embedder: &'a E,
    llm: &'a C,
    index: &'a InMemoryVectorIndex,
    top_k: usize,
}

impl<'a, E: EmbeddingModel, C: CompletionModel> RetrievalQa<'a, E, C> {
    pub fn new(embedder: &'a E, llm: &'a C, index: &'a InMemoryVectorIndex, top_k: usize) -> Self {
        Self {
            embedder,
            llm,
            index,
            top_k,
        }
    }

    /// Embed the question, pull the nearest chunks and ask the model once.
    pub async fn run(&self, question: &str) -> Result<String> {
        let query = self.embedder.embed(question).await?;
        let hits = self.index.search(&query, self.top_k);
        debug!(hits = hits.len(), "retrieved context");

        let context: Vec<&str> = hits.iter().map(|hit| hit.chunk.text.as_str()).collect();
        let prompt = qa_prompt(&context, question);
        let answer = self
            .llm
            .complete(CompletionRequest::deterministic(prompt))
            .await?;
        Ok(answer.trim().to_string())
    }
}

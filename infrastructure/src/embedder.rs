use domain::models::{Embedding, TextChunk};
use domain::ports::EmbeddingModel;
use shared::types::Result;
use tracing::debug;

/// Embeds chunks one remote call at a time, in chunk order.
pub struct Embedder<'a, E> {
    model: &'a E,
}

impl<'a, E: EmbeddingModel> Embedder<'a, E> {
    pub fn new(model: &'a E) -> Self {
        Self { model }
    }

    pub async fn generate_embeddings(&self, chunks: &[TextChunk]) -> Result<Vec<Embedding>> {
        let mut embeddings = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            debug!(chunk = %chunk.id, "embedding chunk");
            let vector = self.model.embed(&chunk.text).await?;
            embeddings.push(Embedding {
                chunk: chunk.clone(),
                vector,
            });
        }
        Ok(embeddings)
    }
}

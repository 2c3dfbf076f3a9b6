use domain::models::{Embedding, RawDocument, TextChunk};
use domain::ports::EmbeddingModel;
use infrastructure::{
    document_loader::TextLoader,
    embedder::Embedder,
    embedding_storage::EmbeddingStorage,
    text_splitter::RecursiveCharacterSplitter,
    vector_index::InMemoryVectorIndex,
};
use shared::types::Result;
use std::path::Path;
use tracing::info;

/// Loaded documents, their chunks in source order, and the index built over them.
pub struct VectorizedDataset {
    pub documents: Vec<RawDocument>,
    pub chunks: Vec<TextChunk>,
    pub index: InMemoryVectorIndex,
}

/// Loads text files, splits them and embeds every chunk into a fresh index.
pub struct DatasetVectorizer<'a, E> {
    model: &'a E,
    cache: Option<&'a EmbeddingStorage>,
}

impl<'a, E: EmbeddingModel> DatasetVectorizer<'a, E> {
    pub fn new(model: &'a E) -> Self {
        Self { model, cache: None }
    }

    pub fn with_cache(mut self, cache: Option<&'a EmbeddingStorage>) -> Self {
        self.cache = cache;
        self
    }

    pub async fn vectorize(
        &self,
        text_paths: &[impl AsRef<Path>],
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Result<VectorizedDataset> {
        let splitter = RecursiveCharacterSplitter::new(chunk_size, chunk_overlap)?;
        let documents = TextLoader::load_all(text_paths)?;
        let embedder = Embedder::new(self.model);

        let mut chunks = Vec::new();
        let mut index = InMemoryVectorIndex::new();
        for document in &documents {
            let document_chunks = splitter.split_document(document);
            info!(
                document = %document.id,
                chunks = document_chunks.len(),
                "split document"
            );
            let embeddings = self
                .embed_document(&embedder, &splitter, document, &document_chunks)
                .await?;
            for embedding in embeddings {
                index.insert(embedding);
            }
            chunks.extend(document_chunks);
        }

        Ok(VectorizedDataset {
            documents,
            chunks,
            index,
        })
    }

    async fn embed_document(
        &self,
        embedder: &Embedder<'_, E>,
        splitter: &RecursiveCharacterSplitter,
        document: &RawDocument,
        chunks: &[TextChunk],
    ) -> Result<Vec<Embedding>> {
        let Some(cache) = self.cache else {
            return embedder.generate_embeddings(chunks).await;
        };

        let digest = EmbeddingStorage::digest(
            self.model.model_id(),
            splitter.chunk_size(),
            splitter.chunk_overlap(),
            &document.text,
        );
        if let Some(cached) = cache.get_embeddings(&digest)? {
            if cached.len() == chunks.len() {
                info!(document = %document.id, "reusing cached embeddings");
                // Same text and settings split identically; only the vectors are reused.
                return Ok(chunks
                    .iter()
                    .cloned()
                    .zip(cached)
                    .map(|(chunk, stored)| Embedding {
                        chunk,
                        vector: stored.vector,
                    })
                    .collect());
            }
        }

        let embeddings = embedder.generate_embeddings(chunks).await?;
        cache.insert_embeddings(&digest, &embeddings)?;
        Ok(embeddings)
    }
}

use crate::search::SearchEngine;
use domain::models::{Embedding, ScoredChunk};

/// Per-document, in-memory similarity index. Rebuilt on every run.
#[derive(Debug, Default, Clone)]
pub struct InMemoryVectorIndex {
    entries: Vec<Embedding>,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_embeddings(entries: Vec<Embedding>) -> Self {
        Self { entries }
    }

    pub fn insert(&mut self, embedding: Embedding) {
        self.entries.push(embedding);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Embedding] {
        &self.entries
    }

    /// Up to `top_k` nearest chunks, most similar first.
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<ScoredChunk> {
        SearchEngine::find_relevant_chunks(query, &self.entries, top_k)
    }
}

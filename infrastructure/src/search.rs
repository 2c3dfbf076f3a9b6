use domain::models::{Embedding, ScoredChunk};
use std::cmp::Ordering;

pub struct SearchEngine;

impl SearchEngine {
    /// Returns 0.0 when either vector has zero magnitude.
    pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot_product / (norm_a * norm_b)
    }

    /// Top `top_k` chunks by descending similarity; ties keep source order.
    pub fn find_relevant_chunks(
        query_embedding: &[f32],
        embeddings: &[Embedding],
        top_k: usize,
    ) -> Vec<ScoredChunk> {
        let mut similarities: Vec<(f32, &Embedding)> = embeddings
            .iter()
            .map(|emb| (Self::cosine_similarity(query_embedding, &emb.vector), emb))
            .collect();

        similarities.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        similarities
            .into_iter()
            .take(top_k)
            .map(|(score, emb)| ScoredChunk {
                chunk: emb.chunk.clone(),
                score,
            })
            .collect()
    }
}

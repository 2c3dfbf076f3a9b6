//! Offline stand-ins for the remote models and the PDF extractor.

use anyhow::anyhow;
use domain::ports::{CompletionModel, CompletionRequest, EmbeddingModel, TextExtractor};
use shared::types::Result;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

const VOCABULARY: [&str; 8] = [
    "deductible", "dental", "abroad", "family", "hospital", "preventive", "price", "limit",
];

/// Bag-of-words embedder over a tiny fixed vocabulary, with a call counter.
#[derive(Default)]
pub struct KeywordEmbedder {
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EmbeddingModel for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let lower = text.to_lowercase();
        let mut vector: Vec<f32> = VOCABULARY
            .iter()
            .map(|word| lower.matches(word).count() as f32)
            .collect();
        // Bias term so keyword-free text still has a direction.
        vector.push(0.1);
        Ok(vector)
    }

    fn model_id(&self) -> &str {
        "keyword-test"
    }
}

/// Records every request. Answers QA prompts with a canned line and fails
/// on request number `fail_at` (zero-based) when set.
#[derive(Default)]
pub struct RecordingLlm {
    requests: Mutex<Vec<CompletionRequest>>,
    fail_at: Option<usize>,
}

impl RecordingLlm {
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl CompletionModel for RecordingLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let mut requests = self
            .requests
            .lock()
            .map_err(|_| anyhow!("recording lock poisoned"))?;
        if Some(requests.len()) == self.fail_at {
            return Err(anyhow!("429 Too Many Requests"));
        }
        let reply = if request.timeout.is_some() {
            "Plan 1: 8/10. Plan 2: 5/10. Recommendation: Plan 1.".to_string()
        } else {
            format!(" answer #{} \n", requests.len() + 1)
        };
        requests.push(request);
        Ok(reply)
    }
}

/// Writes a fixed text per file name instead of parsing a PDF.
pub struct FakePdfExtractor {
    texts: Vec<(String, String)>,
    calls: AtomicUsize,
}

impl FakePdfExtractor {
    pub fn new(texts: &[(&str, &str)]) -> Self {
        Self {
            texts: texts
                .iter()
                .map(|(name, text)| (name.to_string(), text.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextExtractor for FakePdfExtractor {
    fn extract_to(&self, source: &Path, destination: &Path) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("no file name"))?;
        let text = self
            .texts
            .iter()
            .find(|(file, _)| file == name)
            .map(|(_, text)| text.clone())
            .ok_or_else(|| anyhow!("cannot parse {name}"))?;
        fs::write(destination, &text)?;
        Ok(text)
    }
}

pub const GOLD_PLAN: &str = "Gold plan summary.\n\n\
The annual deductible is $500 per person and $1000 per family.\n\n\
Preventive care is covered at 100% with no deductible.\n\n\
Dental care is covered at 80% after the deductible.\n\n\
Coverage abroad includes emergencies in any country for trips under 90 days.\n\n\
Any hospital in the network may be used; out-of-network hospital stays are limited.";

pub const SILVER_PLAN: &str = "Silver plan summary.\n\n\
The annual deductible is $2500 per person.\n\n\
Preventive care is covered after the deductible.\n\n\
Dental care is not covered.\n\n\
There is no coverage abroad.\n\n\
Family members can be added for an extra price.";

/// Writes two placeholder "PDF" uploads and returns their paths.
pub fn write_uploads(dir: &Path) -> Result<(std::path::PathBuf, std::path::PathBuf)> {
    let gold = dir.join("gold.pdf");
    let silver = dir.join("silver.pdf");
    fs::write(&gold, b"%PDF-1.4 gold")?;
    fs::write(&silver, b"%PDF-1.4 silver")?;
    Ok((gold, silver))
}

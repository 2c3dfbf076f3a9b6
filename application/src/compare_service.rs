use crate::qa_service::RetrievalQa;
use crate::summary_service::ComparativeSummarizer;
use crate::vectorize_service::{DatasetVectorizer, VectorizedDataset};
use domain::models::{Criteria, PlanDocument, Recommendation, Transcript};
use domain::ports::{CompletionModel, EmbeddingModel, TextExtractor};
use infrastructure::{config::Config, embedding_storage::EmbeddingStorage, staging::DataDir};
use shared::types::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub summary_timeout: Duration,
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 500,
            top_k: 4,
            summary_timeout: Duration::from_secs(60),
        }
    }
}

impl ComparisonSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            top_k: config.top_k,
            summary_timeout: config.summary_timeout,
        }
    }
}

/// Everything a single comparison run needs from the user.
#[derive(Debug, Clone)]
pub struct ComparisonRequest {
    pub plan_a: Option<PlanDocument>,
    pub plan_b: Option<PlanDocument>,
    pub company_description: String,
    pub questions: Vec<String>,
    pub criteria: Criteria,
}

impl ComparisonRequest {
    /// Both uploads are present.
    pub fn is_ready(&self) -> bool {
        self.plan_a.is_some() && self.plan_b.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    pub transcript: Transcript,
    pub recommendation: Recommendation,
}

/// One linear pass: stage, extract, index each plan, interrogate both, summarize.
pub struct ComparisonWorkflow<X, E, C> {
    extractor: X,
    embedder: E,
    llm: C,
    data_dir: DataDir,
    settings: ComparisonSettings,
    cache: Option<EmbeddingStorage>,
}

impl<X, E, C> ComparisonWorkflow<X, E, C>
where
    X: TextExtractor,
    E: EmbeddingModel,
    C: CompletionModel,
{
    pub fn new(
        extractor: X,
        embedder: E,
        llm: C,
        data_dir: DataDir,
        settings: ComparisonSettings,
    ) -> Self {
        Self {
            extractor,
            embedder,
            llm,
            data_dir,
            settings,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: EmbeddingStorage) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn llm(&self) -> &C {
        &self.llm
    }

    /// Returns `Ok(None)` without touching anything when a plan is missing.
    pub async fn run(&self, request: &ComparisonRequest) -> Result<Option<ComparisonOutcome>> {
        let (Some(plan_a), Some(plan_b)) = (&request.plan_a, &request.plan_b) else {
            info!("waiting for both plan documents");
            return Ok(None);
        };

        let (text_a, text_b) = self.prepare(plan_a, plan_b)?;
        info!("files loaded successfully");

        let dataset_a = self.vectorize(&text_a).await?;
        let dataset_b = self.vectorize(&text_b).await?;
        info!(
            chunks_a = dataset_a.chunks.len(),
            chunks_b = dataset_b.chunks.len(),
            "files vectorized successfully"
        );

        let top_k = self.settings.top_k;
        let qa_a = RetrievalQa::new(&self.embedder, &self.llm, &dataset_a.index, top_k);
        let qa_b = RetrievalQa::new(&self.embedder, &self.llm, &dataset_b.index, top_k);

        let mut transcript = Transcript::new(plan_a.name.as_str(), plan_b.name.as_str());
        for question in &request.questions {
            info!(%question, "asking");
            let answer_a = qa_a.run(question).await?;
            let answer_b = qa_b.run(question).await?;
            transcript.push(question, answer_a, answer_b);
        }

        let recommendation = ComparativeSummarizer::new(&self.llm, self.settings.summary_timeout)
            .summarize(&transcript, &request.company_description, &request.criteria)
            .await?;

        Ok(Some(ComparisonOutcome {
            transcript,
            recommendation,
        }))
    }

    /// Stage both uploads, then extract both. A same-named pair collides and
    /// both sides read the second upload.
    fn prepare(
        &self,
        plan_a: &PlanDocument,
        plan_b: &PlanDocument,
    ) -> Result<(PathBuf, PathBuf)> {
        let staged_a = self.data_dir.stage(&plan_a.pdf_path)?;
        let staged_b = self.data_dir.stage(&plan_b.pdf_path)?;
        let text_a = self.data_dir.text_path(&staged_a);
        let text_b = self.data_dir.text_path(&staged_b);
        if staged_a == staged_b || text_a == text_b || DataDir::same_file(&staged_a, &staged_b) {
            warn!(
                path = %staged_b.display(),
                "both plans resolve to one staged file; the second upload overwrote the first"
            );
        }

        self.extractor.extract_to(&staged_a, &text_a)?;
        self.extractor.extract_to(&staged_b, &text_b)?;
        Ok((text_a, text_b))
    }

    async fn vectorize(&self, text_path: &Path) -> Result<VectorizedDataset> {
        DatasetVectorizer::new(&self.embedder)
            .with_cache(self.cache.as_ref())
            .vectorize(&[text_path], self.settings.chunk_size, self.settings.chunk_overlap)
            .await
    }
}

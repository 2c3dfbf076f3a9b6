use domain::models::{Criteria, Recommendation, Transcript};
use domain::ports::{CompletionModel, CompletionRequest};
use domain::prompts::comparison_prompt;
use shared::types::Result;
use std::time::Duration;
use tracing::info;

/// Turns a finished transcript into the final recommendation.
pub struct ComparativeSummarizer<'a, C> {
    llm: &'a C,
    timeout: Duration,
}

impl<'a, C: CompletionModel> ComparativeSummarizer<'a, C> {
    pub fn new(llm: &'a C, timeout: Duration) -> Self {
        Self { llm, timeout }
    }

    pub async fn summarize(
        &self,
        transcript: &Transcript,
        company_description: &str,
        criteria: &Criteria,
    ) -> Result<Recommendation> {
        let prompt = comparison_prompt(transcript, company_description, criteria);
        info!(questions = transcript.len(), "requesting comparative recommendation");
        let text = self
            .llm
            .complete(CompletionRequest::deterministic(prompt).with_timeout(self.timeout))
            .await?;
        Ok(Recommendation { text })
    }
}

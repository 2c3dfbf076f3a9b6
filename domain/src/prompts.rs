//! Prompt templates sent to the language model.

use crate::models::{Criteria, Transcript};

const QA_TEMPLATE: &str = "Use the following pieces of context to answer the question at the end. \
If you don't know the answer, just say that you don't know, don't try to make up an answer.\n\n\
{context}\n\nQuestion: {question}\nHelpful Answer:";

const COMPARISON_TEMPLATE: &str = "I want you to act as an expert in insurance policies. \
I have asked two companies about their insurance policies and here are their answers:\n\
{summary_of_answers}\n\
I am looking for insurance for a {company_description}. \
I want you to tell me which company is better and why.\n\
Give me a rating (x out of 10) for the following categories for each company separately \
with a short explanation (10 words max) for each category:\n\
{final_criteria}\n\
Your answer and final recommendation after the rating:\n";

/// Question-answering prompt over retrieved context. Chunks are joined
/// verbatim, separated by a blank line.
pub fn qa_prompt(context_chunks: &[&str], question: &str) -> String {
    let context = context_chunks.join("\n\n");
    QA_TEMPLATE
        .replacen("{question}", question, 1)
        .replacen("{context}", &context, 1)
}

/// The single comparison prompt. All three inputs are embedded verbatim.
pub fn comparison_prompt(
    transcript: &Transcript,
    company_description: &str,
    criteria: &Criteria,
) -> String {
    // Each placeholder precedes any inserted text, so the first match is always the template's.
    COMPARISON_TEMPLATE
        .replacen("{final_criteria}", &criteria.render(), 1)
        .replacen("{company_description}", company_description, 1)
        .replacen("{summary_of_answers}", &transcript.render(), 1)
}

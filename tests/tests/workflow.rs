use application::compare_service::{ComparisonRequest, ComparisonSettings, ComparisonWorkflow};
use domain::models::{Criteria, PlanDocument};
use infrastructure::{embedding_storage::EmbeddingStorage, staging::DataDir};
use presentation::defaults::{DEFAULT_COMPANY, DEFAULT_CRITERIA, DEFAULT_QUESTIONS};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tests::{write_uploads, FakePdfExtractor, KeywordEmbedder, RecordingLlm, GOLD_PLAN, SILVER_PLAN};

type Workflow = ComparisonWorkflow<FakePdfExtractor, KeywordEmbedder, RecordingLlm>;

fn settings(top_k: usize) -> ComparisonSettings {
    ComparisonSettings {
        chunk_size: 120,
        chunk_overlap: 20,
        top_k,
        summary_timeout: Duration::from_secs(60),
    }
}

fn workflow(work: &Path, llm: RecordingLlm, top_k: usize) -> Workflow {
    ComparisonWorkflow::new(
        FakePdfExtractor::new(&[("gold.pdf", GOLD_PLAN), ("silver.pdf", SILVER_PLAN)]),
        KeywordEmbedder::default(),
        llm,
        DataDir::new(work.join("data")),
        settings(top_k),
    )
}

fn request(
    gold: Option<PathBuf>,
    silver: Option<PathBuf>,
    questions: &[&str],
) -> ComparisonRequest {
    ComparisonRequest {
        plan_a: gold.map(|p| PlanDocument::new("Gold", p)),
        plan_b: silver.map(|p| PlanDocument::new("Silver", p)),
        company_description: DEFAULT_COMPANY.to_string(),
        questions: questions.iter().map(|q| q.to_string()).collect(),
        criteria: Criteria::new(DEFAULT_CRITERIA.iter().map(|c| c.to_string()).collect()),
    }
}

#[tokio::test]
async fn default_questions_make_twenty_answers_then_one_summary() {
    let work = tempfile::tempdir().unwrap();
    let uploads = work.path().join("uploads");
    std::fs::create_dir_all(&uploads).unwrap();
    let (gold, silver) = write_uploads(&uploads).unwrap();
    let flow = workflow(work.path(), RecordingLlm::default(), 4);

    let outcome = flow
        .run(&request(Some(gold), Some(silver), &DEFAULT_QUESTIONS))
        .await
        .unwrap()
        .expect("both plans present");

    let requests = flow.llm().requests();
    assert_eq!(requests.len(), 21);
    assert!(requests[..20].iter().all(|r| r.timeout.is_none() && r.temperature == 0.0));
    assert_eq!(requests[20].timeout, Some(Duration::from_secs(60)));
    assert_eq!(requests[20].temperature, 0.0);

    // Each question goes to plan A, then plan B.
    for (i, question) in DEFAULT_QUESTIONS.iter().enumerate() {
        let tail = format!("Question: {question}\nHelpful Answer:");
        assert!(requests[2 * i].prompt.ends_with(&tail));
        assert!(requests[2 * i + 1].prompt.ends_with(&tail));
    }

    assert_eq!(outcome.transcript.len(), 10);
    assert_eq!(outcome.transcript.pairs[0].answer_a, "answer #1");
    assert_eq!(outcome.transcript.pairs[0].answer_b, "answer #2");
    assert_eq!(
        outcome.recommendation.text,
        "Plan 1: 8/10. Plan 2: 5/10. Recommendation: Plan 1."
    );

    let summary = &requests[20].prompt;
    assert!(summary.contains(DEFAULT_COMPANY));
    assert!(summary.contains("Gold answer: answer #1;\n Silver answer: answer #2\n"));
    assert!(summary.contains("1. Coverage of different health procedures\n"));
    assert!(summary.contains("3. Price and compensation\n"));
}

#[tokio::test]
async fn each_plan_answers_from_its_own_text() {
    let work = tempfile::tempdir().unwrap();
    let (gold, silver) = write_uploads(work.path()).unwrap();
    let flow = workflow(work.path(), RecordingLlm::default(), 1);

    flow.run(&request(Some(gold), Some(silver), &["Is dental care covered?"]))
        .await
        .unwrap();

    let requests = flow.llm().requests();
    assert!(requests[0].prompt.contains("Dental care is covered at 80% after the deductible."));
    assert!(!requests[0].prompt.contains("Silver"));
    assert!(requests[1].prompt.contains("Dental care is not covered."));
    assert!(!requests[1].prompt.contains("Gold"));
}

#[tokio::test]
async fn missing_plan_makes_no_calls_and_stages_nothing() {
    let work = tempfile::tempdir().unwrap();
    let (gold, _) = write_uploads(work.path()).unwrap();
    let flow = workflow(work.path(), RecordingLlm::default(), 4);

    let outcome = flow
        .run(&request(Some(gold), None, &DEFAULT_QUESTIONS))
        .await
        .unwrap();

    assert!(outcome.is_none());
    assert!(flow.llm().requests().is_empty());
    assert_eq!(flow.embedder().calls(), 0);
    assert!(!work.path().join("data").exists());
}

#[tokio::test]
async fn extracted_text_lands_next_to_the_staged_pdf() {
    let work = tempfile::tempdir().unwrap();
    let (gold, silver) = write_uploads(work.path()).unwrap();
    let flow = workflow(work.path(), RecordingLlm::default(), 4);

    flow.run(&request(Some(gold), Some(silver), &[])).await.unwrap();

    let data = work.path().join("data");
    assert!(data.join("gold.pdf").exists());
    assert_eq!(std::fs::read_to_string(data.join("gold.txt")).unwrap(), GOLD_PLAN);
    assert_eq!(std::fs::read_to_string(data.join("silver.txt")).unwrap(), SILVER_PLAN);
    // No questions still yields the single summary call.
    assert_eq!(flow.llm().requests().len(), 1);
}

#[tokio::test]
async fn embedding_cache_skips_chunk_embedding_on_rerun() {
    let work = tempfile::tempdir().unwrap();
    let (gold, silver) = write_uploads(work.path()).unwrap();
    let cache_path = work.path().join("cache").join("embeddings.db");
    let questions = ["Is dental care covered?", "What is the deductible?"];

    let first = workflow(work.path(), RecordingLlm::default(), 4)
        .with_cache(EmbeddingStorage::new(&cache_path).unwrap());
    first
        .run(&request(Some(gold.clone()), Some(silver.clone()), &questions))
        .await
        .unwrap();
    let question_embeddings = 2 * questions.len();
    assert!(first.embedder().calls() > question_embeddings);

    let second = workflow(work.path(), RecordingLlm::default(), 4)
        .with_cache(EmbeddingStorage::new(&cache_path).unwrap());
    second
        .run(&request(Some(gold), Some(silver), &questions))
        .await
        .unwrap();
    assert_eq!(second.embedder().calls(), question_embeddings);
    assert_eq!(second.llm().requests().len(), 5);
}

#[tokio::test]
async fn remote_failure_aborts_before_the_summary() {
    let work = tempfile::tempdir().unwrap();
    let (gold, silver) = write_uploads(work.path()).unwrap();
    let flow = workflow(work.path(), RecordingLlm::failing_at(3), 4);

    let result = flow
        .run(&request(Some(gold), Some(silver), &DEFAULT_QUESTIONS))
        .await;

    assert!(result.is_err());
    let requests = flow.llm().requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.timeout.is_none()));
}

#[tokio::test]
async fn unreadable_pdf_aborts_before_any_remote_call() {
    let work = tempfile::tempdir().unwrap();
    let uploads = work.path().join("uploads");
    std::fs::create_dir_all(&uploads).unwrap();
    let (gold, _) = write_uploads(&uploads).unwrap();
    let broken = uploads.join("broken.pdf");
    std::fs::write(&broken, b"not a pdf").unwrap();
    let flow = workflow(work.path(), RecordingLlm::default(), 4);

    let result = flow
        .run(&request(Some(gold), Some(broken), &DEFAULT_QUESTIONS))
        .await;

    assert!(result.is_err());
    assert_eq!(flow.embedder().calls(), 0);
    assert!(flow.llm().requests().is_empty());
}

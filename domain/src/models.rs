use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A named PDF plan as handed over by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub name: String,
    pub pdf_path: PathBuf,
}

impl PlanDocument {
    pub fn new(name: impl Into<String>, pdf_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            pdf_path: pdf_path.into(),
        }
    }
}

/// Whole-document text loaded from a plain-text extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: String,
    pub source: PathBuf,
    pub text: String,
}

/// A contiguous slice of a [`RawDocument`].
///
/// `start` is a character offset, not a byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    pub id: String,
    pub document_id: String,
    pub index: usize,
    pub start: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub chunk: TextChunk,
    pub vector: Vec<f32>,
}

/// A retrieved chunk with its similarity to the query (higher is closer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: TextChunk,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer_a: String,
    pub answer_b: String,
}

/// Running record of every question asked against both plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub name_a: String,
    pub name_b: String,
    pub pairs: Vec<QaPair>,
}

impl Transcript {
    pub fn new(name_a: impl Into<String>, name_b: impl Into<String>) -> Self {
        Self {
            name_a: name_a.into(),
            name_b: name_b.into(),
            pairs: Vec::new(),
        }
    }

    pub fn push(&mut self, question: &str, answer_a: String, answer_b: String) {
        self.pairs.push(QaPair {
            question: question.to_string(),
            answer_a,
            answer_b,
        });
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render the transcript in the layout the comparison prompt embeds.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for pair in &self.pairs {
            out.push_str(&format!("Question: {}\n", pair.question));
            out.push_str(&format!(
                "{} answer: {};\n {} answer: {}\n",
                self.name_a, pair.answer_a, self.name_b, pair.answer_b
            ));
        }
        out
    }
}

/// Ordered decision dimensions, numbered only when rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    items: Vec<String>,
}

impl Criteria {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn render(&self) -> String {
        self.items
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. {}\n", i + 1, c))
            .collect()
    }
}

/// The model's comparison output, passed through unparsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
}

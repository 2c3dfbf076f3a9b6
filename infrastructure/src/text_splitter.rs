//! Recursive character splitting with a fixed overlap.
//!
//! A window of at most `chunk_size` characters is laid over the text. Unless
//! the window already reaches the end, its end is pulled back to the latest
//! preferred boundary (paragraph, line, sentence, word) that still leaves the
//! window longer than `chunk_overlap`; failing that, the window is cut hard.
//! The next window starts `chunk_overlap` characters before the previous end,
//! so consecutive chunks always share exactly `chunk_overlap` characters.

use anyhow::bail;
use domain::models::{RawDocument, TextChunk};
use shared::types::Result;

/// Boundaries tried in order, most preferred first.
pub const DEFAULT_SEPARATORS: [&str; 6] = ["\n\n", "\n", ". ", "! ", "? ", " "];

/// A chunk of text and the character offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl RecursiveCharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            bail!("chunk_size must be greater than zero");
        }
        if chunk_overlap >= chunk_size {
            bail!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                chunk_overlap,
                chunk_size
            );
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    pub fn split_text(&self, text: &str) -> Vec<Span> {
        // Byte offset of every character, plus the end of the text.
        let offsets: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let total = offsets.len() - 1;

        let mut spans = Vec::with_capacity(total / (self.chunk_size - self.chunk_overlap) + 1);
        if total == 0 {
            return spans;
        }

        let mut start = 0;
        loop {
            let hard_end = (start + self.chunk_size).min(total);
            let end = if hard_end == total {
                total
            } else {
                self.break_point(text, &offsets, start, hard_end)
            };
            spans.push(Span {
                start,
                text: text[offsets[start]..offsets[end]].to_string(),
            });
            if end == total {
                break;
            }
            start = end - self.chunk_overlap;
        }
        spans
    }

    pub fn split_document(&self, document: &RawDocument) -> Vec<TextChunk> {
        self.split_text(&document.text)
            .into_iter()
            .enumerate()
            .map(|(index, span)| TextChunk {
                id: format!("{}_{index}", document.id),
                document_id: document.id.clone(),
                index,
                start: span.start,
                text: span.text,
            })
            .collect()
    }

    /// Character index in `(start + overlap, hard_end]` to end the window at.
    fn break_point(&self, text: &str, offsets: &[usize], start: usize, hard_end: usize) -> usize {
        let min_end = start + self.chunk_overlap + 1;
        let base = offsets[start];
        let window = &text[base..offsets[hard_end]];

        for separator in &self.separators {
            if let Some(pos) = window.rfind(separator.as_str()) {
                let end_byte = base + pos + separator.len();
                if end_byte >= offsets[min_end] {
                    if let Ok(end) = offsets.binary_search(&end_byte) {
                        return end;
                    }
                }
            }
        }
        hard_end
    }
}

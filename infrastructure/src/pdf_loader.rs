use anyhow::{anyhow, Context};
use domain::ports::TextExtractor;
use shared::types::Result;
use std::fs;
use std::panic;
use std::path::Path;
use tracing::info;

/// Extracts every page of a PDF and saves the text next to it.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfToTextLoader;

impl PdfToTextLoader {
    pub fn new() -> Self {
        Self
    }

    /// Per-page text in page order.
    ///
    /// `pdf_extract` starts every page with a blank line (`"\n\n"`), which
    /// the splitter later treats as a paragraph break.
    pub fn extract_pages(&self, pdf_path: &Path) -> Result<Vec<String>> {
        let bytes = fs::read(pdf_path)
            .with_context(|| format!("Failed to read PDF at {:?}", pdf_path))?;
        // The parser panics on some malformed inputs (e.g. an undefined font resource).
        panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(&bytes))
            .map_err(|_| anyhow!("PDF parser crashed on {:?}", pdf_path))?
            .map_err(|e| anyhow!("Failed to parse PDF at {:?}: {}", pdf_path, e))
    }
}

/// Concatenate page texts with no separator.
pub fn join_pages(pages: &[String]) -> String {
    pages.concat()
}

/// Write `text` to `destination`, replacing whatever was there.
pub fn save_text(destination: &Path, text: &str) -> Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(destination, text)
        .with_context(|| format!("Failed to write text file at {:?}", destination))
}

impl TextExtractor for PdfToTextLoader {
    fn extract_to(&self, source: &Path, destination: &Path) -> Result<String> {
        let pages = self.extract_pages(source)?;
        let text = join_pages(&pages);
        save_text(destination, &text)?;
        info!(
            pdf = %source.display(),
            pages = pages.len(),
            chars = text.chars().count(),
            "extracted PDF text"
        );
        Ok(text)
    }
}

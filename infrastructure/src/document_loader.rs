use anyhow::Context;
use domain::models::RawDocument;
use shared::types::Result;
use std::fs;
use std::path::Path;

/// Loads a plain-text file as a single whole-document blob.
pub struct TextLoader;

impl TextLoader {
    pub fn load(path: &Path) -> Result<RawDocument> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read text file at {:?}", path))?;
        // Extraction output can carry stray bytes from garbled pages.
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok(RawDocument {
            id: Self::document_id(path),
            source: path.to_path_buf(),
            text,
        })
    }

    pub fn load_all(paths: &[impl AsRef<Path>]) -> Result<Vec<RawDocument>> {
        paths.iter().map(|p| Self::load(p.as_ref())).collect()
    }

    fn document_id(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_whole_file_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gold.txt");
        fs::write(&path, "Deductible: $500\n\nDental: yes\n").unwrap();

        let doc = TextLoader::load(&path).unwrap();
        assert_eq!(doc.id, "gold");
        assert_eq!(doc.text, "Deductible: $500\n\nDental: yes\n");
        assert_eq!(doc.source, path);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, [b'o', b'k', 0xff, b'!']).unwrap();
        let doc = TextLoader::load(&path).unwrap();
        assert_eq!(doc.text, "ok\u{fffd}!");
    }

    #[test]
    fn load_all_fails_on_first_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("a.txt");
        fs::write(&present, "a").unwrap();
        let missing = dir.path().join("b.txt");
        assert!(TextLoader::load_all(&[present, missing]).is_err());
    }
}

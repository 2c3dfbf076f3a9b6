use anyhow::{anyhow, Context};
use shared::types::Result;
use shared::utils::text_path_for;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Local directory holding uploaded PDFs and their text extractions.
///
/// Files are keyed by their original file name; a second upload with the
/// same name overwrites the first.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where an upload named like `source` lands.
    pub fn staged_path(&self, source: &Path) -> Result<PathBuf> {
        let name = source
            .file_name()
            .ok_or_else(|| anyhow!("Upload {:?} has no file name", source))?;
        Ok(self.root.join(name))
    }

    /// Copy the upload's bytes into the directory and return the staged path.
    pub fn stage(&self, source: &Path) -> Result<PathBuf> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create data directory {:?}", self.root))?;
        let target = self.staged_path(source)?;
        if Self::same_file(source, &target) {
            debug!(path = %target.display(), "upload already staged");
            return Ok(target);
        }
        let bytes =
            fs::read(source).with_context(|| format!("Failed to read upload {:?}", source))?;
        fs::write(&target, bytes)
            .with_context(|| format!("Failed to stage upload at {:?}", target))?;
        debug!(from = %source.display(), to = %target.display(), "staged upload");
        Ok(target)
    }

    pub fn text_path(&self, staged_pdf: &Path) -> PathBuf {
        text_path_for(staged_pdf)
    }

    /// Both paths exist and resolve to the same file.
    pub fn same_file(a: &Path, b: &Path) -> bool {
        match (a.canonicalize(), b.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

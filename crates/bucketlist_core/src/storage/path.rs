//! Documents directory resolution.

use super::{StoreError, StoreResult};
use std::path::{Path, PathBuf};

/// Supplies the app-private documents directory.
///
/// Platform code resolves the real sandbox path; tests point it at a
/// temporary directory.
pub trait DocumentsDirProvider {
    fn documents_dir(&self) -> StoreResult<PathBuf>;
}

/// Provider backed by one absolute directory chosen up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedDocumentsDir {
    dir: PathBuf,
}

impl FixedDocumentsDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }
}

impl DocumentsDirProvider for FixedDocumentsDir {
    fn documents_dir(&self) -> StoreResult<PathBuf> {
        if self.dir.as_os_str().is_empty() {
            return Err(StoreError::DocumentsDir(
                "documents directory path is empty".to_string(),
            ));
        }
        if !self.dir.is_absolute() {
            return Err(StoreError::DocumentsDir(format!(
                "documents directory must be absolute, got `{}`",
                self.dir.display()
            )));
        }
        Ok(self.dir.clone())
    }
}

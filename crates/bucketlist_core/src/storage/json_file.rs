//! JSON file implementation of `PlaceStore`.
//!
//! # Responsibility
//! - Persist places to `<documents>/SavedPlaces` as a JSON array.
//! - Replace the file atomically; on Unix the file is owner-only from creation.
//!
//! # Invariants
//! - Readers never observe a half-written file: data lands in a `.tmp`
//!   sibling first and is renamed over the target.
//! - The same place list always encodes to the same bytes.

use super::{DocumentsDirProvider, PlaceStore, StoreError, StoreResult};
use crate::model::place::Place;
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File name of the saved place list inside the documents directory.
pub const SAVED_PLACES_FILE_NAME: &str = "SavedPlaces";
const TEMP_EXTENSION: &str = "tmp";

/// Place store writing one JSON file under the documents directory.
pub struct JsonFilePlaceStore<P: DocumentsDirProvider> {
    provider: P,
}

impl<P: DocumentsDirProvider> JsonFilePlaceStore<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Full path of the saved-places file.
    pub fn file_path(&self) -> StoreResult<PathBuf> {
        Ok(self.provider.documents_dir()?.join(SAVED_PLACES_FILE_NAME))
    }
}

impl<P: DocumentsDirProvider> PlaceStore for JsonFilePlaceStore<P> {
    fn read_places(&self) -> StoreResult<Vec<Place>> {
        let path = self.file_path()?;
        let bytes = fs::read(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(StoreError::Decode)
    }

    fn write_places(&self, places: &[Place]) -> StoreResult<()> {
        let started_at = Instant::now();
        let dir = self.provider.documents_dir()?;
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        let bytes = serde_json::to_vec(places).map_err(StoreError::Encode)?;
        let path = dir.join(SAVED_PLACES_FILE_NAME);
        write_atomic(&path, &bytes)?;

        debug!(
            "event=places_write module=storage status=ok bytes={} duration_ms={}",
            bytes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let temp_path = path.with_extension(TEMP_EXTENSION);
    // Leftover from an interrupted save; `create_new` below needs it gone.
    let _ = fs::remove_file(&temp_path);

    if let Err(source) = write_owner_only(&temp_path, bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::Io {
            path: temp_path,
            source,
        });
    }

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// Creates `path` readable by its owner only (Unix) and flushes `bytes` to it.
///
/// The mode is set at creation, so the data is never readable by others.
fn write_owner_only(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    #[cfg(not(unix))]
    debug!("event=file_protection module=storage status=skipped reason=unsupported_platform");

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

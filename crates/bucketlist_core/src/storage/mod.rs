//! Saved-places persistence.
//!
//! # Responsibility
//! - Load and save the full place list as one JSON document.
//! - Resolve the documents directory through an injected provider.
//!
//! # Invariants
//! - Every save rewrites the whole file; there are no partial writes.
//! - `PlaceStore::load` and `PlaceStore::save` never return errors to callers.
//!   Failures degrade to an empty list or an unsaved session and are logged.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;
mod path;

pub use json_file::{JsonFilePlaceStore, SAVED_PLACES_FILE_NAME};
pub use path::{DocumentsDirProvider, FixedDocumentsDir};

use crate::model::place::Place;
use log::{error, info, warn};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence gateway errors.
#[derive(Debug)]
pub enum StoreError {
    DocumentsDir(String),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode(serde_json::Error),
    Decode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentsDir(message) => {
                write!(f, "documents directory unavailable: {message}")
            }
            Self::Io { path, source } => write!(f, "io error at `{}`: {source}", path.display()),
            Self::Encode(err) => write!(f, "failed to encode places: {err}"),
            Self::Decode(err) => write!(f, "failed to decode places: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DocumentsDir(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Decode(err) => Some(err),
        }
    }
}

impl StoreError {
    /// Stable code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DocumentsDir(_) => "documents_dir_unavailable",
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                "file_not_found"
            }
            Self::Io { .. } => "io_failed",
            Self::Encode(_) => "encode_failed",
            Self::Decode(_) => "decode_failed",
        }
    }
}

/// Storage contract for the saved place list.
pub trait PlaceStore {
    /// Reads the full list, surfacing every failure.
    fn read_places(&self) -> StoreResult<Vec<Place>>;

    /// Replaces the full list, surfacing every failure.
    fn write_places(&self, places: &[Place]) -> StoreResult<()>;

    /// Loads the saved list, degrading to empty on any failure.
    fn load(&self) -> Vec<Place> {
        match self.read_places() {
            Ok(places) => {
                info!(
                    "event=places_load module=storage status=ok count={}",
                    places.len()
                );
                places
            }
            Err(err) => {
                warn!(
                    "event=places_load module=storage status=error error_code={} error={}",
                    err.code(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Saves the full list; failures are logged and dropped.
    fn save(&self, places: &[Place]) {
        match self.write_places(places) {
            Ok(()) => info!(
                "event=places_save module=storage status=ok count={}",
                places.len()
            ),
            Err(err) => error!(
                "event=places_save module=storage status=error error_code={} error={}",
                err.code(),
                err
            ),
        }
    }
}

impl<T: PlaceStore + ?Sized> PlaceStore for &T {
    fn read_places(&self) -> StoreResult<Vec<Place>> {
        (**self).read_places()
    }

    fn write_places(&self, places: &[Place]) -> StoreResult<()> {
        (**self).write_places(places)
    }
}

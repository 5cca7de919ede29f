//! Core domain logic for the Bucket List app.
//! This crate is the single source of truth for place persistence and the
//! unlock gate.

pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod unlock;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::place::{
    Coordinate, Place, PlaceId, PlaceValidationError, PLACEHOLDER_TITLE, UNKNOWN_VALUE,
};
pub use service::app::{BucketListApp, Screen};
pub use service::places_session::{
    Pin, PlaceDetails, PlaceEdit, PlacesSession, Presentation, SessionError,
};
pub use storage::{
    DocumentsDirProvider, FixedDocumentsDir, JsonFilePlaceStore, PlaceStore, StoreError,
    StoreResult, SAVED_PLACES_FILE_NAME,
};
pub use unlock::{
    BiometricCapability, BiometricOracle, GateState, UnlockAlert, UnlockEvent, UnlockFailure,
    UnlockGate, VerificationOutcome, UNLOCK_JUSTIFICATION,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the unlock gate and places session to Dart via FRB.
//! - Own the one process-wide app instance behind a mutex.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Places operations answer `ok=false` while the gate is locked.
//! - The documents directory is fixed once the app instance exists.

use bucketlist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    BiometricCapability, BucketListApp, Coordinate, FixedDocumentsDir, GateState,
    JsonFilePlaceStore, Place, PlaceEdit, PlacesSession, Presentation, UnlockEvent,
    VerificationOutcome,
};
use log::info;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

const DOCUMENTS_DIR_ENV: &str = "BUCKETLIST_DOCUMENTS_DIR";
const DEFAULT_DOCUMENTS_SUBDIR: &str = "bucketlist";
const UNKNOWN_STATE_LABEL: &str = "unknown";

type FfiStore = JsonFilePlaceStore<FixedDocumentsDir>;
type FfiApp = BucketListApp<FfiStore>;

static DOCUMENTS_DIR: OnceLock<PathBuf> = OnceLock::new();
static APP: OnceLock<Mutex<FfiApp>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Points place storage at the app-private documents directory.
///
/// # FFI contract
/// - Must run before the first unlock/places call to take effect.
/// - Repeating with the same directory is a no-op.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_documents_dir(dir: String) -> String {
    let requested = PathBuf::from(dir.trim());
    if !requested.is_absolute() {
        return format!(
            "documents dir must be an absolute path, got `{}`",
            requested.display()
        );
    }

    let active = DOCUMENTS_DIR.get_or_init(|| requested.clone());
    if *active != requested {
        return format!(
            "documents dir already set to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        );
    }
    info!("event=documents_dir_configure module=ffi status=ok");
    String::new()
}

/// Gate snapshot returned by every unlock call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockResponse {
    /// `locked|pending|unlocked`, or `unknown` when the app state is unreadable.
    pub state: String,
    /// `unlocked|already_unlocked|awaiting_verification|cancelled|ignored|denied|none`.
    pub event: String,
    /// Prompt text for the platform biometric dialog when verification is due.
    pub justification: Option<String>,
    pub alert_title: Option<String>,
    pub alert_message: Option<String>,
    /// Non-empty only when the call itself failed.
    pub error: String,
}

/// Place row rendered as a map pin.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Snapshot of the places screen after one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesResponse {
    pub ok: bool,
    pub items: Vec<PlaceItem>,
    pub selected_id: Option<String>,
    /// Details alert content while the alert is presented.
    pub details_title: Option<String>,
    pub details_message: Option<String>,
    /// Whether the edit sheet is presented.
    pub editing: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl PlacesResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            selected_id: None,
            details_title: None,
            details_message: None,
            editing: false,
            message: message.into(),
        }
    }
}

/// Starts an unlock with the platform's biometric capability answer.
///
/// When the response event is `awaiting_verification`, Dart runs the
/// biometric prompt and reports back through `unlock_complete`.
#[flutter_rust_bridge::frb(sync)]
pub fn unlock_begin(
    capability_available: bool,
    unavailable_reason: Option<String>,
) -> UnlockResponse {
    let capability = if capability_available {
        BiometricCapability::Available
    } else {
        BiometricCapability::Unavailable {
            reason: unavailable_reason.unwrap_or_default(),
        }
    };
    unlock_call(|app| app.begin_unlock(capability))
}

/// Reports the biometric verification result for the pending unlock.
#[flutter_rust_bridge::frb(sync)]
pub fn unlock_complete(verified: bool, failure_reason: Option<String>) -> UnlockResponse {
    let outcome = if verified {
        VerificationOutcome::Verified
    } else {
        VerificationOutcome::Rejected {
            reason: failure_reason.unwrap_or_default(),
        }
    };
    unlock_call(|app| app.complete_unlock(outcome))
}

/// Abandons a pending unlock whose biometric prompt never reported back.
///
/// Dart calls this when the prompt is torn down without a result (platform
/// exception, app backgrounded) so `unlock_begin` works again.
#[flutter_rust_bridge::frb(sync)]
pub fn unlock_cancel() -> UnlockResponse {
    unlock_call(|app| app.cancel_unlock())
}

/// Clears the unlock alert after the user closed it.
#[flutter_rust_bridge::frb(sync)]
pub fn unlock_dismiss_alert() -> UnlockResponse {
    match with_app(|app| {
        app.dismiss_unlock_alert();
        to_unlock_response(app, None)
    }) {
        Ok(response) => response,
        Err(err) => unlock_failure(err),
    }
}

/// First display of the places screen; loads saved places once.
#[flutter_rust_bridge::frb(sync)]
pub fn places_appear() -> PlacesResponse {
    places_call("places_appear", |session| {
        session.appear();
        Ok(())
    })
}

/// Records the map centre reported by the map widget.
#[flutter_rust_bridge::frb(sync)]
pub fn places_set_centre(latitude: f64, longitude: f64) -> PlacesResponse {
    places_call("places_set_centre", |session| {
        let centre = Coordinate::new(latitude, longitude).map_err(|err| err.to_string())?;
        session.set_centre(centre);
        Ok(())
    })
}

/// Adds a placeholder place at the map centre and opens the edit sheet.
#[flutter_rust_bridge::frb(sync)]
pub fn places_add_at_centre() -> PlacesResponse {
    places_call("places_add_at_centre", |session| {
        session.add_at_centre().map_err(|err| err.to_string())?;
        Ok(())
    })
}

/// Selects a tapped pin and presents its details alert.
#[flutter_rust_bridge::frb(sync)]
pub fn places_select(place_id: String) -> PlacesResponse {
    places_call("places_select", |session| {
        let id = parse_place_id(&place_id)?;
        session
            .select_place(id)
            .map(|_| ())
            .ok_or_else(|| format!("place not found: {id}"))
    })
}

/// "OK" action of the details alert.
#[flutter_rust_bridge::frb(sync)]
pub fn places_acknowledge() -> PlacesResponse {
    places_call("places_acknowledge", |session| {
        session.acknowledge_details();
        Ok(())
    })
}

/// "Edit" action of the details alert.
#[flutter_rust_bridge::frb(sync)]
pub fn places_edit_selected() -> PlacesResponse {
    places_call("places_edit_selected", |session| {
        session.edit_selected();
        Ok(())
    })
}

/// Applies title/subtitle changes from the edit sheet.
#[flutter_rust_bridge::frb(sync)]
pub fn places_update(place_id: String, title: String, subtitle: String) -> PlacesResponse {
    places_call("places_update", |session| {
        let id = parse_place_id(&place_id)?;
        session
            .apply_edit(PlaceEdit {
                id,
                title,
                subtitle,
            })
            .map_err(|err| err.to_string())
    })
}

/// Closes the edit sheet and saves every place.
#[flutter_rust_bridge::frb(sync)]
pub fn places_dismiss_edit() -> PlacesResponse {
    places_call("places_dismiss_edit", |session| {
        session.dismiss_edit();
        Ok(())
    })
}

fn resolve_documents_dir() -> PathBuf {
    DOCUMENTS_DIR
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DOCUMENTS_DIR_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DEFAULT_DOCUMENTS_SUBDIR)
        })
        .clone()
}

fn with_app<T>(f: impl FnOnce(&mut FfiApp) -> T) -> Result<T, String> {
    let app = APP.get_or_init(|| {
        let store = JsonFilePlaceStore::new(FixedDocumentsDir::new(resolve_documents_dir()));
        Mutex::new(BucketListApp::new(store))
    });
    let mut guard = app
        .lock()
        .map_err(|_| "app state lock poisoned".to_string())?;
    Ok(f(&mut guard))
}

fn unlock_call(f: impl FnOnce(&mut FfiApp) -> UnlockEvent) -> UnlockResponse {
    match with_app(|app| {
        let event = f(app);
        to_unlock_response(app, Some(&event))
    }) {
        Ok(response) => response,
        Err(err) => unlock_failure(err),
    }
}

fn places_call(
    operation: &str,
    f: impl FnOnce(&mut PlacesSession<FfiStore>) -> Result<(), String>,
) -> PlacesResponse {
    let outcome = with_app(|app| {
        let Some(session) = app.places_mut() else {
            return PlacesResponse::failure(format!("{operation} failed: places are locked"));
        };
        match f(&mut *session) {
            Ok(()) => to_places_response(session, "ok"),
            Err(err) => PlacesResponse {
                ok: false,
                ..to_places_response(session, format!("{operation} failed: {err}"))
            },
        }
    });
    outcome.unwrap_or_else(|err| PlacesResponse::failure(format!("{operation} failed: {err}")))
}

fn to_unlock_response(app: &FfiApp, event: Option<&UnlockEvent>) -> UnlockResponse {
    let alert = app.gate().alert();
    UnlockResponse {
        state: gate_state_label(app.gate().state()).to_string(),
        event: event.map_or("none", unlock_event_label).to_string(),
        justification: match event {
            Some(UnlockEvent::AwaitingVerification { justification }) => {
                Some((*justification).to_string())
            }
            _ => None,
        },
        alert_title: alert.map(|alert| alert.title.to_string()),
        alert_message: alert.map(|alert| alert.message.to_string()),
        error: String::new(),
    }
}

fn unlock_failure(error: String) -> UnlockResponse {
    UnlockResponse {
        state: UNKNOWN_STATE_LABEL.to_string(),
        event: "none".to_string(),
        justification: None,
        alert_title: None,
        alert_message: None,
        error,
    }
}

fn to_places_response(
    session: &PlacesSession<FfiStore>,
    message: impl Into<String>,
) -> PlacesResponse {
    let (details_title, details_message, editing) = match session.presentation() {
        Presentation::Details(details) => {
            (Some(details.title.clone()), Some(details.message.clone()), false)
        }
        Presentation::Editing(_) => (None, None, true),
        Presentation::None => (None, None, false),
    };
    PlacesResponse {
        ok: true,
        items: session.places().iter().map(to_place_item).collect(),
        selected_id: session.selected().map(|place| place.id.to_string()),
        details_title,
        details_message,
        editing,
        message: message.into(),
    }
}

fn to_place_item(place: &Place) -> PlaceItem {
    PlaceItem {
        id: place.id.to_string(),
        title: place.title.clone(),
        subtitle: place.subtitle.clone(),
        latitude: place.coordinate.latitude,
        longitude: place.coordinate.longitude,
    }
}

fn parse_place_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|err| format!("invalid place id `{raw}`: {err}"))
}

fn gate_state_label(state: GateState) -> &'static str {
    match state {
        GateState::Locked => "locked",
        GateState::Pending => "pending",
        GateState::Unlocked => "unlocked",
    }
}

fn unlock_event_label(event: &UnlockEvent) -> &'static str {
    match event {
        UnlockEvent::Unlocked => "unlocked",
        UnlockEvent::AlreadyUnlocked => "already_unlocked",
        UnlockEvent::AwaitingVerification { .. } => "awaiting_verification",
        UnlockEvent::Cancelled => "cancelled",
        UnlockEvent::Ignored => "ignored",
        UnlockEvent::Denied(_) => "denied",
    }
}

//! Map/annotation session.
//!
//! # Responsibility
//! - Own the authoritative in-memory place list, selection and map centre.
//! - Drive the details alert and edit sheet the host UI presents.
//! - Decide when the list is loaded and saved.
//!
//! # Invariants
//! - The list is loaded at most once per session (first `appear`).
//! - Edits are applied explicitly through `apply_edit`; nothing observes
//!   field changes behind the session's back.
//! - Dismissing the edit sheet always saves the full list.

use crate::model::place::{Coordinate, Place, PlaceId, PlaceValidationError};
use crate::storage::PlaceStore;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

const UNKNOWN_TITLE: &str = "Unknown";
const MISSING_DETAILS: &str = "Missing place information";

/// Session operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    UnknownPlace(PlaceId),
    Validation(PlaceValidationError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPlace(id) => write!(f, "place not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownPlace(_) => None,
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<PlaceValidationError> for SessionError {
    fn from(value: PlaceValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Content of the alert shown for a selected pin.
///
/// The alert offers two actions: acknowledge (`acknowledge_details`) or edit
/// (`edit_selected`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceDetails {
    pub title: String,
    pub message: String,
}

/// Explicit title/subtitle replacement produced by the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceEdit {
    pub id: PlaceId,
    pub title: String,
    pub subtitle: String,
}

/// What the host should currently present over the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    None,
    Details(PlaceDetails),
    /// Edit sheet for a copy of the selected place; `None` when the
    /// selection vanished.
    Editing(Option<Place>),
}

/// Pin handed to the map renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub id: PlaceId,
    pub title: String,
    pub subtitle: String,
    pub coordinate: Coordinate,
}

/// Session state behind the unlocked places screen.
pub struct PlacesSession<S: PlaceStore> {
    store: S,
    places: Vec<Place>,
    selected: Option<PlaceId>,
    centre: Coordinate,
    presentation: Presentation,
    loaded: bool,
}

impl<S: PlaceStore> PlacesSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            places: Vec::new(),
            selected: None,
            centre: Coordinate::default(),
            presentation: Presentation::None,
            loaded: false,
        }
    }

    /// Handles first display of the places screen.
    ///
    /// Replaces the in-memory list with the saved one on the first call only.
    pub fn appear(&mut self) {
        if self.loaded {
            debug!("event=places_appear module=session status=skipped reason=already_loaded");
            return;
        }
        self.places = self.store.load();
        self.loaded = true;
        info!(
            "event=places_appear module=session status=ok count={}",
            self.places.len()
        );
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        self.places.iter().find(|place| place.id == id)
    }

    pub fn pins(&self) -> Vec<Pin> {
        self.places
            .iter()
            .map(|place| Pin {
                id: place.id,
                title: place.title.clone(),
                subtitle: place.subtitle.clone(),
                coordinate: place.coordinate,
            })
            .collect()
    }

    pub fn centre(&self) -> Coordinate {
        self.centre
    }

    /// Records the map centre reported by the map renderer.
    pub fn set_centre(&mut self, centre: Coordinate) {
        self.centre = centre;
    }

    pub fn selected(&self) -> Option<&Place> {
        self.selected.and_then(|id| self.place(id))
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Adds a placeholder place at the map centre and opens its edit sheet.
    ///
    /// # Errors
    /// - `Validation` when the current centre is not a valid coordinate.
    pub fn add_at_centre(&mut self) -> Result<PlaceId, SessionError> {
        self.centre.validate()?;
        let place = Place::new(self.centre);
        let id = place.id;
        self.places.push(place);
        self.selected = Some(id);
        self.presentation = Presentation::Editing(self.selected().cloned());
        info!(
            "event=place_add module=session status=ok count={}",
            self.places.len()
        );
        Ok(id)
    }

    /// Selects a pin and presents its details alert.
    ///
    /// Returns `None` and changes nothing when `id` is unknown.
    pub fn select_place(&mut self, id: PlaceId) -> Option<PlaceDetails> {
        self.place(id)?;
        self.selected = Some(id);
        let details = self.details();
        self.presentation = Presentation::Details(details.clone());
        Some(details)
    }

    /// Details alert content for the current selection.
    pub fn details(&self) -> PlaceDetails {
        match self.selected() {
            Some(place) => PlaceDetails {
                title: place.title.clone(),
                message: place.subtitle.clone(),
            },
            None => PlaceDetails {
                title: UNKNOWN_TITLE.to_string(),
                message: MISSING_DETAILS.to_string(),
            },
        }
    }

    /// "OK" action of the details alert.
    pub fn acknowledge_details(&mut self) {
        if matches!(self.presentation, Presentation::Details(_)) {
            self.presentation = Presentation::None;
        }
    }

    /// "Edit" action of the details alert.
    pub fn edit_selected(&mut self) -> Option<Place> {
        let draft = self.selected().cloned();
        self.presentation = Presentation::Editing(draft.clone());
        draft
    }

    /// Replaces title and subtitle of the place with `edit.id`.
    pub fn apply_edit(&mut self, edit: PlaceEdit) -> Result<(), SessionError> {
        let place = self
            .places
            .iter_mut()
            .find(|place| place.id == edit.id)
            .ok_or(SessionError::UnknownPlace(edit.id))?;
        place.title = edit.title;
        place.subtitle = edit.subtitle;

        if let Presentation::Editing(Some(draft)) = &mut self.presentation {
            if draft.id == place.id {
                *draft = place.clone();
            }
        }
        Ok(())
    }

    /// Closes the edit sheet and saves the whole list, changed or not.
    pub fn dismiss_edit(&mut self) {
        if matches!(self.presentation, Presentation::Editing(_)) {
            self.presentation = Presentation::None;
        }
        self.store.save(&self.places);
    }
}

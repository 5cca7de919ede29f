use bucketlist_core::{
    Coordinate, FixedDocumentsDir, JsonFilePlaceStore, Place, PlaceEdit, PlaceStore,
    PlacesSession, Presentation, SessionError, StoreResult,
};
use std::cell::{Cell, RefCell};
use tempfile::TempDir;
use uuid::Uuid;

/// In-memory store that counts reads and writes.
#[derive(Default)]
struct RecordingStore {
    saved: RefCell<Vec<Place>>,
    reads: Cell<usize>,
    writes: Cell<usize>,
}

impl RecordingStore {
    fn with_places(places: Vec<Place>) -> Self {
        Self {
            saved: RefCell::new(places),
            ..Self::default()
        }
    }
}

impl PlaceStore for RecordingStore {
    fn read_places(&self) -> StoreResult<Vec<Place>> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.saved.borrow().clone())
    }

    fn write_places(&self, places: &[Place]) -> StoreResult<()> {
        self.writes.set(self.writes.get() + 1);
        *self.saved.borrow_mut() = places.to_vec();
        Ok(())
    }
}

fn coordinate(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate::new(latitude, longitude).unwrap()
}

#[test]
fn add_at_centre_on_empty_list_selects_new_place() {
    let store = RecordingStore::default();
    let mut session = PlacesSession::new(&store);
    session.appear();
    session.set_centre(coordinate(10.0, 20.0));

    let id = session.add_at_centre().unwrap();

    assert_eq!(session.places().len(), 1);
    let place = &session.places()[0];
    assert_eq!(place.id, id);
    assert_eq!(place.title, "Example Location");
    assert_eq!(place.coordinate, coordinate(10.0, 20.0));
    assert_eq!(session.selected().map(|place| place.id), Some(id));
    assert!(matches!(
        session.presentation(),
        Presentation::Editing(Some(draft)) if draft.id == id
    ));
}

#[test]
fn add_at_invalid_centre_is_rejected() {
    let store = RecordingStore::default();
    let mut session = PlacesSession::new(&store);
    session.set_centre(Coordinate {
        latitude: f64::INFINITY,
        longitude: 0.0,
    });

    let err = session.add_at_centre().unwrap_err();
    assert!(matches!(err, SessionError::Validation(_)));
    assert!(session.places().is_empty());
}

#[test]
fn appear_loads_only_once() {
    let existing = Place::new(coordinate(1.0, 2.0));
    let store = RecordingStore::with_places(vec![existing.clone()]);
    let mut session = PlacesSession::new(&store);

    session.appear();
    session.add_at_centre().unwrap();
    session.appear();

    assert_eq!(store.reads.get(), 1);
    assert_eq!(session.places().len(), 2);
    assert_eq!(session.places()[0], existing);
}

#[test]
fn dismiss_edit_saves_even_without_changes() {
    let store = RecordingStore::default();
    let mut session = PlacesSession::new(&store);
    session.appear();
    session.add_at_centre().unwrap();

    session.dismiss_edit();

    assert_eq!(store.writes.get(), 1);
    assert_eq!(store.saved.borrow().as_slice(), session.places());
    assert_eq!(session.presentation(), &Presentation::None);
}

#[test]
fn apply_edit_updates_place_and_persists_on_dismiss() {
    let store = RecordingStore::default();
    let mut session = PlacesSession::new(&store);
    session.appear();
    let id = session.add_at_centre().unwrap();

    session
        .apply_edit(PlaceEdit {
            id,
            title: "Machu Picchu".to_string(),
            subtitle: "Hike the Inca trail".to_string(),
        })
        .unwrap();
    assert!(matches!(
        session.presentation(),
        Presentation::Editing(Some(draft)) if draft.title == "Machu Picchu"
    ));
    session.dismiss_edit();

    let saved = store.saved.borrow();
    assert_eq!(saved[0].title, "Machu Picchu");
    assert_eq!(saved[0].subtitle, "Hike the Inca trail");
}

#[test]
fn apply_edit_for_unknown_place_fails() {
    let store = RecordingStore::default();
    let mut session = PlacesSession::new(&store);
    let missing = Uuid::new_v4();

    let err = session
        .apply_edit(PlaceEdit {
            id: missing,
            title: "x".to_string(),
            subtitle: "y".to_string(),
        })
        .unwrap_err();
    assert_eq!(err, SessionError::UnknownPlace(missing));
}

#[test]
fn select_place_presents_details_then_edit() {
    let mut place = Place::new(coordinate(48.85, 2.35));
    place.title = "Paris".to_string();
    place.subtitle = "See the Louvre".to_string();
    let id = place.id;
    let store = RecordingStore::with_places(vec![place]);
    let mut session = PlacesSession::new(&store);
    session.appear();

    let details = session.select_place(id).expect("place should be selectable");
    assert_eq!(details.title, "Paris");
    assert_eq!(details.message, "See the Louvre");
    assert!(matches!(session.presentation(), Presentation::Details(_)));

    let draft = session.edit_selected().expect("selection should exist");
    assert_eq!(draft.id, id);
    assert!(matches!(session.presentation(), Presentation::Editing(Some(_))));
}

#[test]
fn acknowledge_closes_details_without_saving() {
    let place = Place::new(coordinate(0.0, 0.0));
    let id = place.id;
    let store = RecordingStore::with_places(vec![place]);
    let mut session = PlacesSession::new(&store);
    session.appear();

    session.select_place(id).unwrap();
    session.acknowledge_details();

    assert_eq!(session.presentation(), &Presentation::None);
    assert_eq!(store.writes.get(), 0);
}

#[test]
fn selecting_unknown_place_changes_nothing() {
    let store = RecordingStore::default();
    let mut session = PlacesSession::new(&store);
    session.appear();

    assert!(session.select_place(Uuid::new_v4()).is_none());
    assert!(session.selected().is_none());
    assert_eq!(session.presentation(), &Presentation::None);

    let details = session.details();
    assert_eq!(details.title, "Unknown");
    assert_eq!(details.message, "Missing place information");
}

#[test]
fn selection_survives_reload_by_id() {
    let dir = TempDir::new().unwrap();
    let store = JsonFilePlaceStore::new(FixedDocumentsDir::new(dir.path()));

    let mut first = PlacesSession::new(&store);
    first.appear();
    first.set_centre(coordinate(35.68, 139.69));
    let id = first.add_at_centre().unwrap();
    first.dismiss_edit();

    let mut second = PlacesSession::new(&store);
    second.appear();
    let details = second.select_place(id).expect("reloaded place keeps its id");
    assert_eq!(details.title, "Example Location");
    assert_eq!(second.pins()[0].coordinate, coordinate(35.68, 139.69));
}

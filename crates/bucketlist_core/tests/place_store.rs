use bucketlist_core::{
    Coordinate, FixedDocumentsDir, JsonFilePlaceStore, Place, PlaceStore, StoreError,
    SAVED_PLACES_FILE_NAME,
};
use std::fs;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> JsonFilePlaceStore<FixedDocumentsDir> {
    JsonFilePlaceStore::new(FixedDocumentsDir::new(dir.path()))
}

fn sample_places() -> Vec<Place> {
    let mut first = Place::new(Coordinate::new(51.5, -0.12).unwrap());
    first.title = "Big Ben".to_string();
    first.subtitle = "Clock tower".to_string();
    let second = Place::new(Coordinate::new(-33.86, 151.21).unwrap());
    let mut third = Place::new(Coordinate::new(0.0, 0.0).unwrap());
    third.title = String::new();
    vec![first, second, third]
}

#[test]
fn load_from_empty_documents_dir_returns_empty_list() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store.load().is_empty());
    assert!(matches!(
        store.read_places(),
        Err(StoreError::Io { .. })
    ));
}

#[test]
fn save_then_load_returns_single_example_place() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut place = Place::new(Coordinate::new(51.5, -0.12).unwrap());
    place.subtitle = "Unknown value".to_string();

    store.save(std::slice::from_ref(&place));
    let loaded = store.load();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].title, "Example Location");
    assert_eq!(loaded[0].subtitle, "Unknown value");
    assert_eq!(loaded[0].coordinate.latitude, 51.5);
    assert_eq!(loaded[0].coordinate.longitude, -0.12);
    assert_eq!(loaded[0].id, place.id);
}

#[test]
fn save_then_load_preserves_values_and_order() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let places = sample_places();

    store.write_places(&places).unwrap();

    assert_eq!(store.read_places().unwrap(), places);
}

#[test]
fn save_is_idempotent_and_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let places = sample_places();
    let path = dir.path().join(SAVED_PLACES_FILE_NAME);

    store.write_places(&places).unwrap();
    let first = fs::read(&path).unwrap();
    store.write_places(&places).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert!(!dir.path().join("SavedPlaces.tmp").exists());
}

#[test]
fn save_replaces_whole_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.write_places(&sample_places()).unwrap();
    store.write_places(&[]).unwrap();

    assert!(store.read_places().unwrap().is_empty());
}

#[test]
fn corrupt_file_loads_as_empty_list() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(dir.path().join(SAVED_PLACES_FILE_NAME), b"{not json").unwrap();

    assert!(store.load().is_empty());
    assert!(matches!(store.read_places(), Err(StoreError::Decode(_))));
}

#[test]
fn null_text_fields_keep_saved_places_across_next_save() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(
        dir.path().join(SAVED_PLACES_FILE_NAME),
        br#"[{"title":"Rome","subtitle":null,"latitude":41.89,"longitude":12.49},{"title":"Paris","subtitle":"Louvre","latitude":48.86,"longitude":2.34}]"#,
    )
    .unwrap();

    let mut places = store.load();
    assert_eq!(places.len(), 2);
    places.push(Place::new(Coordinate::new(0.0, 0.0).unwrap()));
    store.save(&places);

    let reloaded = store.read_places().unwrap();
    let titles: Vec<&str> = reloaded.iter().map(|place| place.title.as_str()).collect();
    assert_eq!(titles, ["Rome", "Paris", "Example Location"]);
    assert_eq!(reloaded[0].subtitle, "Unknown value");
}

#[test]
fn mismatched_shape_loads_as_empty_list() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(
        dir.path().join(SAVED_PLACES_FILE_NAME),
        br#"{"title":"not an array"}"#,
    )
    .unwrap();

    assert!(store.load().is_empty());
}

#[test]
fn save_creates_missing_documents_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("Documents");
    let store = JsonFilePlaceStore::new(FixedDocumentsDir::new(&nested));

    store.write_places(&sample_places()).unwrap();

    assert!(nested.join(SAVED_PLACES_FILE_NAME).is_file());
}

#[test]
fn relative_documents_dir_fails_quietly() {
    let store = JsonFilePlaceStore::new(FixedDocumentsDir::new("relative/docs"));

    store.save(&sample_places());
    assert!(store.load().is_empty());
    assert!(matches!(
        store.write_places(&[]),
        Err(StoreError::DocumentsDir(_))
    ));
}

#[cfg(unix)]
#[test]
fn saved_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.write_places(&sample_places()).unwrap();

    let mode = fs::metadata(dir.path().join(SAVED_PLACES_FILE_NAME))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[cfg(unix)]
#[test]
fn stale_temp_file_is_replaced_with_owner_only_file() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let stale = dir.path().join("SavedPlaces.tmp");
    fs::write(&stale, b"half written").unwrap();
    fs::set_permissions(&stale, fs::Permissions::from_mode(0o644)).unwrap();

    let places = sample_places();
    store.write_places(&places).unwrap();

    assert!(!stale.exists());
    assert_eq!(store.read_places().unwrap(), places);
    let mode = fs::metadata(dir.path().join(SAVED_PLACES_FILE_NAME))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn failed_replace_removes_temp_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let blocker = dir.path().join(SAVED_PLACES_FILE_NAME);
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep"), b"x").unwrap();

    let err = store.write_places(&sample_places()).unwrap_err();

    assert!(matches!(err, StoreError::Io { .. }));
    assert!(!dir.path().join("SavedPlaces.tmp").exists());
}

//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `bucketlist_core` linkage without the Flutter runtime.
//! - Print the saved places of a documents directory for quick inspection.
//!
//! Usage: `bucketlist_cli [DOCUMENTS_DIR]`; falls back to
//! `BUCKETLIST_DOCUMENTS_DIR`.

use bucketlist_core::{FixedDocumentsDir, JsonFilePlaceStore, PlaceStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("bucketlist_core ping={}", bucketlist_core::ping());
    println!("bucketlist_core version={}", bucketlist_core::core_version());

    let Some(dir) = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("BUCKETLIST_DOCUMENTS_DIR").ok())
    else {
        return ExitCode::SUCCESS;
    };

    let store = JsonFilePlaceStore::new(FixedDocumentsDir::new(dir));
    match store.read_places() {
        Ok(places) => {
            println!("places count={}", places.len());
            for place in places {
                println!(
                    "{} lat={} lon={} title={:?} subtitle={:?}",
                    place.id,
                    place.coordinate.latitude,
                    place.coordinate.longitude,
                    place.title,
                    place.subtitle
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("places read failed: {err}");
            ExitCode::FAILURE
        }
    }
}

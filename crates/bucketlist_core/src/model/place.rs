//! Place domain model.
//!
//! # Responsibility
//! - Define the annotation record the map shows as a pin.
//! - Own placeholder text and coordinate validation rules.
//!
//! # Invariants
//! - `id` is generated once at creation and survives save/load round-trips.
//! - Selection and comparison across reloads go through `id`, never through
//!   in-memory position.
//! - A persisted place always carries a finite, in-range coordinate.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a place.
pub type PlaceId = Uuid;

/// Title given to a place created from the map centre.
pub const PLACEHOLDER_TITLE: &str = "Example Location";
/// Text used for a missing or not-yet-edited title/subtitle.
pub const UNKNOWN_VALUE: &str = "Unknown value";

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// Validation errors for place records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaceValidationError {
    NilId,
    NonFiniteCoordinate { latitude: f64, longitude: f64 },
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl Display for PlaceValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "place id must not be nil"),
            Self::NonFiniteCoordinate {
                latitude,
                longitude,
            } => write!(
                f,
                "coordinate must be finite, got ({latitude}, {longitude})"
            ),
            Self::LatitudeOutOfRange(value) => {
                write!(f, "latitude {value} is outside [-90, 90]")
            }
            Self::LongitudeOutOfRange(value) => {
                write!(f, "longitude {value} is outside [-180, 180]")
            }
        }
    }
}

impl Error for PlaceValidationError {}

/// Geographic position in degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Builds a coordinate and validates its range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, PlaceValidationError> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    pub fn validate(&self) -> Result<(), PlaceValidationError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(PlaceValidationError::NonFiniteCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        if self.latitude.abs() > MAX_LATITUDE {
            return Err(PlaceValidationError::LatitudeOutOfRange(self.latitude));
        }
        if self.longitude.abs() > MAX_LONGITUDE {
            return Err(PlaceValidationError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

/// A user-created point of interest.
///
/// Serialized flat as `{id, title, subtitle, latitude, longitude}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlaceRecord")]
pub struct Place {
    pub id: PlaceId,
    pub title: String,
    pub subtitle: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
}

impl Place {
    /// Creates a place with placeholder text and a generated id.
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: PLACEHOLDER_TITLE.to_string(),
            subtitle: UNKNOWN_VALUE.to_string(),
            coordinate,
        }
    }

    /// Creates a place with a caller-provided id.
    ///
    /// # Errors
    /// - `NilId` when `id` is nil.
    /// - Coordinate range errors from `Coordinate::validate`.
    pub fn with_id(
        id: PlaceId,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        coordinate: Coordinate,
    ) -> Result<Self, PlaceValidationError> {
        let place = Self {
            id,
            title: title.into(),
            subtitle: subtitle.into(),
            coordinate,
        };
        place.validate()?;
        Ok(place)
    }

    pub fn validate(&self) -> Result<(), PlaceValidationError> {
        if self.id.is_nil() {
            return Err(PlaceValidationError::NilId);
        }
        self.coordinate.validate()
    }
}

/// Lenient wire shape accepted on load.
///
/// Records written before ids existed, or with an absent or `null`
/// title/subtitle, still decode; the gaps are filled the same way a fresh
/// place would be.
#[derive(Deserialize)]
struct PlaceRecord {
    #[serde(default = "Uuid::new_v4")]
    id: PlaceId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl TryFrom<PlaceRecord> for Place {
    type Error = PlaceValidationError;

    fn try_from(record: PlaceRecord) -> Result<Self, Self::Error> {
        Place::with_id(
            record.id,
            record.title.unwrap_or_else(|| UNKNOWN_VALUE.to_string()),
            record.subtitle.unwrap_or_else(|| UNKNOWN_VALUE.to_string()),
            Coordinate {
                latitude: record.latitude,
                longitude: record.longitude,
            },
        )
    }
}

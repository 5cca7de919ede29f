//! Domain model for saved places.
//!
//! # Responsibility
//! - Define canonical data structures shared by storage and session code.
//!
//! # Invariants
//! - Every place is identified by a stable `PlaceId`.
//! - There is no delete; a place lives until the process ends or the file is
//!   replaced by the next save.

pub mod place;

//! Use-case level state for the host UI.
//!
//! # Responsibility
//! - Combine the unlock gate, place list and persistence into the flows the
//!   screen drives.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod app;
pub mod places_session;

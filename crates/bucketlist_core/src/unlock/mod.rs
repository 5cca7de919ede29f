//! Biometric unlock gate.
//!
//! # Responsibility
//! - Track whether the places screen may be shown.
//! - Turn biometric oracle answers into state changes and user alerts.
//!
//! # Invariants
//! - `Unlocked` is terminal for the session.
//! - At most one verification is in flight (`Pending`).
//! - Every failed request yields exactly one alert and leaves the gate `Locked`.

mod gate;
mod oracle;

pub use gate::{GateState, UnlockAlert, UnlockEvent, UnlockFailure, UnlockGate};
pub use oracle::{BiometricCapability, BiometricOracle, VerificationOutcome, UNLOCK_JUSTIFICATION};

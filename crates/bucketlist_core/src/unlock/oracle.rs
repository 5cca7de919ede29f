//! Biometric oracle contract.
//!
//! The platform (Face ID, Touch ID, fingerprint) answers two questions: can
//! this device authenticate biometrically, and did the user pass. Core treats
//! both answers as opaque.

/// Reason shown by the platform prompt while verifying.
pub const UNLOCK_JUSTIFICATION: &str = "Please authenticate yourself to unlock your places.";

/// Result of a biometric capability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BiometricCapability {
    Available,
    /// `reason` is platform diagnostic text, logged but not shown.
    Unavailable { reason: String },
}

/// Result of one biometric verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    Rejected { reason: String },
}

/// External biometric authentication service.
pub trait BiometricOracle {
    fn check_capability(&self) -> BiometricCapability;

    /// Runs verification, showing `justification` to the user.
    fn verify(&self, justification: &str) -> VerificationOutcome;
}

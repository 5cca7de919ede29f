//! Unlock gate state machine.

use super::oracle::{
    BiometricCapability, BiometricOracle, VerificationOutcome, UNLOCK_JUSTIFICATION,
};
use crate::logging::sanitize_message;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MAX_REASON_LOG_CHARS: usize = 120;

/// Gate lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Locked,
    /// Verification started and has not reported back yet.
    Pending,
    Unlocked,
}

/// Modal message shown to the user after a failed unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockAlert {
    pub title: &'static str,
    pub message: &'static str,
}

/// Why an unlock request did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockFailure {
    BiometricUnavailable { reason: String },
    VerificationFailed { reason: String },
}

impl UnlockFailure {
    /// User-facing alert for this failure.
    pub fn alert(&self) -> UnlockAlert {
        match self {
            Self::BiometricUnavailable { .. } => UnlockAlert {
                title: "No FaceID or TouchID",
                message: "Your device does not support biometric authentication.",
            },
            Self::VerificationFailed { .. } => UnlockAlert {
                title: "Error",
                message: "You are not yourself.",
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::BiometricUnavailable { .. } => "biometric_unavailable",
            Self::VerificationFailed { .. } => "verification_failed",
        }
    }

    /// Platform diagnostic text, flattened to one line and capped for logs.
    fn log_reason(&self) -> String {
        let reason = match self {
            Self::BiometricUnavailable { reason } | Self::VerificationFailed { reason } => reason,
        };
        if reason.trim().is_empty() {
            return "unspecified".to_string();
        }
        sanitize_message(reason.trim(), MAX_REASON_LOG_CHARS)
    }
}

impl Display for UnlockFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BiometricUnavailable { reason } => {
                write!(f, "biometric authentication unavailable: {reason}")
            }
            Self::VerificationFailed { reason } => {
                write!(f, "biometric verification failed: {reason}")
            }
        }
    }
}

impl Error for UnlockFailure {}

/// Observable result of one gate operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockEvent {
    /// The gate just moved to `Unlocked`.
    Unlocked,
    /// The gate was already unlocked; nothing happened.
    AlreadyUnlocked,
    /// Verification must now run; report back with `complete_unlock`.
    AwaitingVerification { justification: &'static str },
    /// The pending verification was abandoned; the gate is `Locked` again.
    Cancelled,
    /// Dropped because of the current state (request while pending, or
    /// completion with nothing pending).
    Ignored,
    /// Request failed; the gate stays locked.
    Denied(UnlockFailure),
}

/// Two-state access gate with an in-flight sub-state.
///
/// `begin_unlock`/`complete_unlock` let async hosts run verification off the
/// UI thread and hand the outcome back; `&mut self` keeps every transition on
/// the caller's thread.
#[derive(Debug, Default)]
pub struct UnlockGate {
    state: GateState,
    alert: Option<UnlockAlert>,
}

impl UnlockGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    /// Alert waiting to be shown, if any.
    pub fn alert(&self) -> Option<UnlockAlert> {
        self.alert
    }

    /// Clears the current alert once the user has dismissed it.
    pub fn dismiss_alert(&mut self) -> Option<UnlockAlert> {
        self.alert.take()
    }

    /// Runs capability check and verification against `oracle` in one call.
    pub fn request_unlock<O: BiometricOracle + ?Sized>(&mut self, oracle: &O) -> UnlockEvent {
        // Pending and Unlocked answer without consulting the oracle.
        if self.state != GateState::Locked {
            return self.begin_unlock(BiometricCapability::Available);
        }

        match self.begin_unlock(oracle.check_capability()) {
            UnlockEvent::AwaitingVerification { justification } => {
                let outcome = oracle.verify(justification);
                self.complete_unlock(outcome)
            }
            other => other,
        }
    }

    /// Starts an unlock using the platform's capability answer.
    ///
    /// # Contract
    /// - `Unlocked`: returns `AlreadyUnlocked`, no change.
    /// - `Pending`: returns `Ignored`, no second verification starts.
    /// - `Locked` + unavailable: stays `Locked`, returns `Denied`.
    /// - `Locked` + available: moves to `Pending`.
    pub fn begin_unlock(&mut self, capability: BiometricCapability) -> UnlockEvent {
        match self.state {
            GateState::Unlocked => UnlockEvent::AlreadyUnlocked,
            GateState::Pending => {
                debug!("event=unlock_begin module=unlock status=ignored reason=pending");
                UnlockEvent::Ignored
            }
            GateState::Locked => match capability {
                BiometricCapability::Available => {
                    self.state = GateState::Pending;
                    self.alert = None;
                    info!("event=unlock_begin module=unlock status=pending");
                    UnlockEvent::AwaitingVerification {
                        justification: UNLOCK_JUSTIFICATION,
                    }
                }
                BiometricCapability::Unavailable { reason } => {
                    self.deny(UnlockFailure::BiometricUnavailable { reason })
                }
            },
        }
    }

    /// Resolves the pending verification.
    pub fn complete_unlock(&mut self, outcome: VerificationOutcome) -> UnlockEvent {
        if self.state != GateState::Pending {
            debug!(
                "event=unlock_complete module=unlock status=ignored state={:?}",
                self.state
            );
            return UnlockEvent::Ignored;
        }

        match outcome {
            VerificationOutcome::Verified => {
                self.state = GateState::Unlocked;
                self.alert = None;
                info!("event=unlock_complete module=unlock status=ok");
                UnlockEvent::Unlocked
            }
            VerificationOutcome::Rejected { reason } => {
                self.state = GateState::Locked;
                self.deny(UnlockFailure::VerificationFailed { reason })
            }
        }
    }

    /// Abandons the pending verification without raising an alert.
    ///
    /// Hosts call this when the platform prompt never reports back (prompt
    /// torn down, app backgrounded, platform exception) so the user can retry.
    /// Outside `Pending` it returns `Ignored`.
    pub fn cancel_unlock(&mut self) -> UnlockEvent {
        if self.state != GateState::Pending {
            debug!(
                "event=unlock_cancel module=unlock status=ignored state={:?}",
                self.state
            );
            return UnlockEvent::Ignored;
        }
        self.state = GateState::Locked;
        info!("event=unlock_cancel module=unlock status=ok");
        UnlockEvent::Cancelled
    }

    fn deny(&mut self, failure: UnlockFailure) -> UnlockEvent {
        warn!(
            "event=unlock_denied module=unlock status=error error_code={} reason={}",
            failure.code(),
            failure.log_reason()
        );
        self.alert = Some(failure.alert());
        UnlockEvent::Denied(failure)
    }
}

//! Top-level screen wiring: unlock gate in front of the places session.

use crate::service::places_session::PlacesSession;
use crate::storage::PlaceStore;
use crate::unlock::{
    BiometricCapability, BiometricOracle, GateState, UnlockAlert, UnlockEvent, UnlockGate,
    VerificationOutcome,
};

/// Which screen the host renders. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Locked {
        pending: bool,
        alert: Option<UnlockAlert>,
    },
    Places,
}

/// Bucket list app state: the gate plus the session it guards.
pub struct BucketListApp<S: PlaceStore> {
    gate: UnlockGate,
    session: PlacesSession<S>,
}

impl<S: PlaceStore> BucketListApp<S> {
    pub fn new(store: S) -> Self {
        Self {
            gate: UnlockGate::new(),
            session: PlacesSession::new(store),
        }
    }

    pub fn gate(&self) -> &UnlockGate {
        &self.gate
    }

    pub fn screen(&self) -> Screen {
        if self.gate.is_unlocked() {
            Screen::Places
        } else {
            Screen::Locked {
                pending: self.gate.state() == GateState::Pending,
                alert: self.gate.alert(),
            }
        }
    }

    pub fn request_unlock<O: BiometricOracle + ?Sized>(&mut self, oracle: &O) -> UnlockEvent {
        self.gate.request_unlock(oracle)
    }

    pub fn begin_unlock(&mut self, capability: BiometricCapability) -> UnlockEvent {
        self.gate.begin_unlock(capability)
    }

    pub fn complete_unlock(&mut self, outcome: VerificationOutcome) -> UnlockEvent {
        self.gate.complete_unlock(outcome)
    }

    pub fn cancel_unlock(&mut self) -> UnlockEvent {
        self.gate.cancel_unlock()
    }

    pub fn dismiss_unlock_alert(&mut self) -> Option<UnlockAlert> {
        self.gate.dismiss_alert()
    }

    /// Places session, available only once unlocked.
    pub fn places(&self) -> Option<&PlacesSession<S>> {
        self.gate.is_unlocked().then_some(&self.session)
    }

    pub fn places_mut(&mut self) -> Option<&mut PlacesSession<S>> {
        if self.gate.is_unlocked() {
            Some(&mut self.session)
        } else {
            None
        }
    }
}

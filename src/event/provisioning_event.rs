// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Provisioning event types.

use chrono::{DateTime, Utc};

use crate::peripheral::DecodeError;
use crate::state::ProvisioningState;
use crate::types::ConnectivityStatus;

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningEventKind {
    /// Entry actions of `state` ran.
    StateEntered {
        /// The state entered.
        state: ProvisioningState,
        /// The state whose entry actions ran before, if any.
        previous: Option<ProvisioningState>,
    },

    /// The Wi-Fi link status changed.
    ConnectivityChanged {
        /// The new status.
        status: ConnectivityStatus,
    },

    /// A Wi-Fi QR code was scanned and accepted.
    ///
    /// Carries only the SSID; the password never leaves the provisioner.
    CredentialScanned {
        /// Network name from the code.
        ssid: String,
    },

    /// A QR code was decoded but holds no credential.
    PayloadIgnored {
        /// The decoded text.
        payload: String,
    },

    /// A QR code was located but could not be decoded.
    DecodeFailed {
        /// The final decode error.
        error: DecodeError,
    },

    /// The reset button was pressed; a restart follows.
    ResetRequested,
}

/// A timestamped [`ProvisioningEventKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningEvent {
    /// When the event was published.
    pub at: DateTime<Utc>,
    /// What happened.
    pub kind: ProvisioningEventKind,
}

impl ProvisioningEvent {
    /// Stamps `kind` with the current time.
    #[must_use]
    pub fn now(kind: ProvisioningEventKind) -> Self {
        Self { at: Utc::now(), kind }
    }

    /// Returns the entered state for [`ProvisioningEventKind::StateEntered`].
    #[must_use]
    pub fn entered_state(&self) -> Option<ProvisioningState> {
        match self.kind {
            ProvisioningEventKind::StateEntered { state, .. } => Some(state),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_stamps_current_time() {
        let before = Utc::now();
        let event = ProvisioningEvent::now(ProvisioningEventKind::ResetRequested);
        assert!(event.at >= before);
        assert!(event.at <= Utc::now());
    }

    #[test]
    fn entered_state_only_for_state_events() {
        let entered = ProvisioningEvent::now(ProvisioningEventKind::StateEntered {
            state: ProvisioningState::Servicing,
            previous: Some(ProvisioningState::ConfiguringService),
        });
        assert_eq!(entered.entered_state(), Some(ProvisioningState::Servicing));

        let other = ProvisioningEvent::now(ProvisioningEventKind::ConnectivityChanged {
            status: ConnectivityStatus::Connected,
        });
        assert_eq!(other.entered_state(), None);
    }
}

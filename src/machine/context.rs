// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mutable provisioning state carried from tick to tick.

use tokio::time::Instant;

use super::SettleTimer;
use crate::credential::WifiCredential;
use crate::state::{EdgeDetector, ProvisioningState};
use crate::types::ConnectivityStatus;

/// Counters for the scan-and-decode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanStats {
    /// Frames pulled from the camera.
    pub frames: u64,
    /// Symbols located in those frames.
    pub symbols: u64,
    /// Symbols decoded, including after a mirrored retry.
    pub decoded: u64,
    /// Symbols that could not be decoded.
    pub failed: u64,
    /// Mirrored retries attempted.
    pub mirror_retries: u64,
}

/// Everything the provisioner remembers between ticks.
#[derive(Debug, Clone)]
pub struct ProvisioningContext {
    pub(super) state: ProvisioningState,
    pub(super) entries: EdgeDetector<ProvisioningState>,
    pub(super) connectivity: EdgeDetector<ConnectivityStatus>,
    pub(super) credential: WifiCredential,
    pub(super) settle: SettleTimer,
    pub(super) broker_started: bool,
    pub(super) restart_at: Option<Instant>,
    pub(super) restarted: bool,
    pub(super) stats: ScanStats,
}

impl ProvisioningContext {
    /// The boot context: `Unconfigured`, no entry actions run yet, link stopped.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ProvisioningState::Unconfigured,
            entries: EdgeDetector::new(),
            connectivity: EdgeDetector::with_initial(ConnectivityStatus::Stopped),
            credential: WifiCredential::default(),
            settle: SettleTimer::new(),
            broker_started: false,
            restart_at: None,
            restarted: false,
            stats: ScanStats::default(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ProvisioningState {
        self.state
    }

    /// State whose entry actions ran last, `None` before the first tick.
    #[must_use]
    pub fn entered_state(&self) -> Option<ProvisioningState> {
        self.entries.last()
    }

    /// Last connectivity status seen.
    #[must_use]
    pub fn connectivity(&self) -> ConnectivityStatus {
        self.connectivity
            .last()
            .unwrap_or(ConnectivityStatus::Stopped)
    }

    /// Credential in use, if one was loaded or scanned.
    #[must_use]
    pub fn credential(&self) -> Option<&WifiCredential> {
        self.credential.has_ssid().then_some(&self.credential)
    }

    /// Scan counters.
    #[must_use]
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Settling pauses armed so far.
    #[must_use]
    pub fn settle_count(&self) -> u64 {
        self.settle.arms()
    }

    /// Returns `true` once the broker has been started.
    #[must_use]
    pub fn broker_started(&self) -> bool {
        self.broker_started
    }

    /// Returns `true` once a restart has been requested.
    #[must_use]
    pub fn reset_requested(&self) -> bool {
        self.restart_at.is_some()
    }

    pub(super) fn transition(&mut self, next: ProvisioningState) {
        if self.state != next {
            tracing::info!(from = %self.state, to = %next, "Provisioning state change");
            self.state = next;
        }
    }
}

impl Default for ProvisioningContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_context() {
        let ctx = ProvisioningContext::new();
        assert_eq!(ctx.state(), ProvisioningState::Unconfigured);
        assert_eq!(ctx.entered_state(), None);
        assert_eq!(ctx.connectivity(), ConnectivityStatus::Stopped);
        assert!(ctx.credential().is_none());
        assert!(!ctx.reset_requested());
        assert_eq!(ctx.stats(), ScanStats::default());
    }

    #[test]
    fn credential_hidden_until_it_has_ssid() {
        let mut ctx = ProvisioningContext::new();
        ctx.credential = WifiCredential::new("", "WPA", "pw");
        assert!(ctx.credential().is_none());

        ctx.credential = WifiCredential::new("Net", "WPA", "pw");
        assert_eq!(ctx.credential().map(WifiCredential::ssid), Some("Net"));
    }
}

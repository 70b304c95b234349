// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Provisioning state enumeration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the device is in the provisioning flow.
///
/// ```text
/// Unconfigured ──stored credential──▶ Connecting ──link up──▶ Connected
///      │                                  ▲                       │
///      └──none──▶ ScanningQRCode ──scan───┘                       ▼
///                                       Servicing ◀──client── ConfiguringService
/// ```
///
/// `ConnectFailed` is part of the vocabulary but no transition enters it:
/// a device that cannot join its network stays in `Connecting` until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProvisioningState {
    /// Just booted; the credential store has not been consulted yet.
    #[default]
    Unconfigured,
    /// Associating with a known network.
    Connecting,
    /// Link is up; services are being started.
    Connected,
    /// Showing the companion QR code, waiting for a client.
    ConfiguringService,
    /// Serving clients; the log uses the whole screen.
    Servicing,
    /// A stored credential did not work.
    ConnectFailed,
    /// Waiting for a Wi-Fi QR code in front of the camera.
    ScanningQRCode,
}

impl ProvisioningState {
    /// Returns a short lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unconfigured => "unconfigured",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::ConfiguringService => "configuring-service",
            Self::Servicing => "servicing",
            Self::ConnectFailed => "connect-failed",
            Self::ScanningQRCode => "scanning-qrcode",
        }
    }

    /// Returns `true` while the camera is in use.
    #[must_use]
    pub const fn is_scanning(&self) -> bool {
        matches!(self, Self::ScanningQRCode)
    }
}

impl fmt::Display for ProvisioningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unconfigured() {
        assert_eq!(ProvisioningState::default(), ProvisioningState::Unconfigured);
    }

    #[test]
    fn display_names() {
        assert_eq!(ProvisioningState::ScanningQRCode.to_string(), "scanning-qrcode");
        assert_eq!(
            ProvisioningState::ConfiguringService.to_string(),
            "configuring-service"
        );
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wi-Fi station link status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Link status of the Wi-Fi station interface.
///
/// Driver codes without a dedicated variant map to [`ConnectivityStatus::Other`],
/// which keeps the raw code for logging.
///
/// # Examples
///
/// ```
/// use qrprov_lib::types::ConnectivityStatus;
///
/// assert_eq!(ConnectivityStatus::default(), ConnectivityStatus::Stopped);
/// assert!(ConnectivityStatus::Connected.is_connected());
/// assert_eq!(ConnectivityStatus::Other(4).to_string(), "status 4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConnectivityStatus {
    /// The station interface is not running.
    #[default]
    Stopped,
    /// Associated and holding an address.
    Connected,
    /// The configured network was not found.
    NoTargetFound,
    /// Association was lost or refused.
    Disconnected,
    /// Any other driver status.
    Other(u8),
}

impl ConnectivityStatus {
    /// Returns `true` for [`ConnectivityStatus::Connected`].
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Connected => write!(f, "connected"),
            Self::NoTargetFound => write!(f, "no target found"),
            Self::Disconnected => write!(f, "disconnected"),
            Self::Other(code) => write!(f, "status {code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_connected_is_connected() {
        assert!(ConnectivityStatus::Connected.is_connected());
        assert!(!ConnectivityStatus::Stopped.is_connected());
        assert!(!ConnectivityStatus::NoTargetFound.is_connected());
        assert!(!ConnectivityStatus::Disconnected.is_connected());
        assert!(!ConnectivityStatus::Other(3).is_connected());
    }

    #[test]
    fn other_codes_compare_by_value() {
        assert_eq!(ConnectivityStatus::Other(1), ConnectivityStatus::Other(1));
        assert_ne!(ConnectivityStatus::Other(1), ConnectivityStatus::Other(2));
    }
}

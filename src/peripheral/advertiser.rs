// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local network name advertisement.

use crate::error::AdvertiseError;

/// One announced service, e.g. `_mqtt._tcp` on port 1883.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    /// Service type without the leading underscore, e.g. `mqtt`.
    pub service: String,
    /// Transport protocol, `tcp` or `udp`.
    pub protocol: String,
    /// Port the service listens on.
    pub port: u16,
    /// Human-readable instance name.
    pub instance_name: String,
}

impl ServiceRecord {
    /// Creates a TCP service record.
    #[must_use]
    pub fn tcp(service: impl Into<String>, port: u16, instance_name: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            protocol: "tcp".to_string(),
            port,
            instance_name: instance_name.into(),
        }
    }
}

/// Announces the device's host name and services (mDNS or similar).
pub trait ServiceAdvertiser {
    /// Claims `hostname` and announces `services`.
    ///
    /// # Errors
    ///
    /// Returns [`AdvertiseError`] if the name or a record is rejected.
    fn advertise(
        &mut self,
        hostname: &str,
        services: &[ServiceRecord],
    ) -> Result<(), AdvertiseError>;
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wi-Fi station control.

use std::net::IpAddr;

use crate::types::ConnectivityStatus;

/// The Wi-Fi station interface and the device restart hook.
///
/// `connect` only starts association; progress is observed through
/// [`Connectivity::status`] on later ticks.
pub trait Connectivity {
    /// Current link status.
    fn status(&mut self) -> ConnectivityStatus;

    /// Station address, once connected.
    fn local_address(&self) -> Option<IpAddr>;

    /// Starts associating with `ssid`.
    fn connect(&mut self, ssid: &str, password: &str);

    /// Whether the driver keeps the last used credential across restarts.
    fn persist_last_credential(&mut self, persist: bool);

    /// Forgets any credential the driver stored.
    fn erase_credentials(&mut self);

    /// Drops the current association.
    fn disconnect(&mut self);

    /// Restarts the whole device.
    fn restart_device(&mut self);
}

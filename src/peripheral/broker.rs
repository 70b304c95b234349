// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Message broker service.

use std::sync::Arc;

use crate::activity::BrokerObserver;
use crate::error::BrokerError;

/// The on-device message broker.
///
/// The provisioner starts it once the device is online and then calls
/// [`BrokerService::pump`] every tick. Client activity is reported through
/// the [`BrokerObserver`] handed to [`BrokerService::start`].
pub trait BrokerService {
    /// Binds the listeners and starts accepting clients.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError`] if a listener cannot be bound.
    fn start(&mut self, observer: Arc<dyn BrokerObserver>) -> Result<(), BrokerError>;

    /// Performs pending I/O without blocking. A no-op before `start`.
    fn pump(&mut self);
}

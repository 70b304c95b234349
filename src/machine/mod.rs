// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The tick-driven provisioning state machine.
//!
//! Each [`Provisioner::tick`] runs these steps in order:
//!
//! 1. Reset handling, and skipping the tick while a settling pause is pending
//! 2. Connectivity sampling, logging one line per status change
//! 3. Entry actions for a newly entered state
//! 4. Scan-and-decode while in `ScanningQRCode`
//! 5. Broker housekeeping and activity notices
//! 6. Exit conditions
//!
//! All state is owned by the [`Provisioner`]; nothing is shared across
//! threads except the [`ActivityTracker`](crate::activity::ActivityTracker)
//! handed to the broker.

mod context;
mod provisioner;
mod scan;
mod timer;

pub use context::{ProvisioningContext, ScanStats};
pub use provisioner::{Provisioner, TickOutcome};
pub use timer::SettleTimer;

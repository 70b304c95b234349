// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event stream for provisioning progress.
//!
//! The provisioner publishes a [`ProvisioningEvent`] for every state entry,
//! connectivity transition, scanned payload, decode failure and reset. The
//! [`EventBus`] uses tokio's broadcast channel, so any number of tasks can
//! follow along (a status LED driver, a remote logger, a test).
//!
//! # Examples
//!
//! ```
//! use qrprov_lib::event::{EventBus, ProvisioningEvent, ProvisioningEventKind};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(ProvisioningEvent::now(ProvisioningEventKind::ResetRequested));
//! assert!(matches!(
//!     rx.try_recv().unwrap().kind,
//!     ProvisioningEventKind::ResetRequested
//! ));
//! ```

mod event_bus;
mod provisioning_event;

pub use event_bus::EventBus;
pub use provisioning_event::{ProvisioningEvent, ProvisioningEventKind};

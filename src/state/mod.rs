// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Provisioning states and change detection.
//!
//! The provisioner reacts to changes, not levels: entry actions run once when
//! the state changes, and connectivity status lines are printed once per
//! transition. [`EdgeDetector`] implements that comparison.
//!
//! # Examples
//!
//! ```
//! use qrprov_lib::state::{EdgeDetector, ProvisioningState};
//!
//! // Starts from the "never observed" sentinel, so the first value is a change
//! let mut edges = EdgeDetector::new();
//! assert_eq!(edges.observe(ProvisioningState::Unconfigured), Some(ProvisioningState::Unconfigured));
//! assert_eq!(edges.observe(ProvisioningState::Unconfigured), None);
//! assert_eq!(edges.observe(ProvisioningState::Connecting), Some(ProvisioningState::Connecting));
//! ```

mod edge;
mod provisioning_state;

pub use edge::EdgeDetector;
pub use provisioning_state::ProvisioningState;

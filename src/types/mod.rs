// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared between the state machine and its peripherals.
//!
//! # Types
//!
//! - [`ConnectivityStatus`] - Station link status reported by the Wi-Fi driver
//! - [`Frame`] - One grayscale camera frame
//! - [`Region`] - A rectangle on the display

mod connectivity;
mod frame;
mod region;

pub use connectivity::ConnectivityStatus;
pub use frame::Frame;
pub use region::Region;

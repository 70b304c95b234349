// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Buttons and touch.

/// Physical inputs, sampled once per tick.
pub trait ControlPanel {
    /// Returns `true` once per press-and-release of the reset button.
    fn reset_clicked(&mut self) -> bool;

    /// Returns `true` while the screen is being touched.
    fn touched(&mut self) -> bool;
}

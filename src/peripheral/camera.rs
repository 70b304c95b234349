// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Camera frame source.

use crate::error::CameraError;
use crate::types::Frame;

/// A grayscale camera.
pub trait CameraSource {
    /// Brings the sensor up in grayscale mode.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError`] if the sensor is unavailable. The provisioner
    /// treats this as fatal.
    fn init(&mut self) -> Result<(), CameraError>;

    /// Returns the next frame if one is ready. Never blocks.
    fn try_get_frame(&mut self) -> Option<Frame>;

    /// Hands a frame buffer back to the driver.
    fn release(&mut self, frame: Frame);
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Display and speaker.

use crate::types::{Frame, Region};

/// Everything the user sees or hears.
///
/// Log lines go to a scrolling region whose placement is set with
/// [`Presentation::resize_log_region`].
pub trait Presentation {
    /// Appends one line to the log region.
    fn log_line(&mut self, text: &str);

    /// Clears the whole display.
    fn clear(&mut self);

    /// Moves and resizes the log region; its contents are reset.
    fn resize_log_region(&mut self, region: Region);

    /// Draws `text` as a QR code outside the log region.
    fn render_qr(&mut self, text: &str);

    /// Shows a scaled camera preview.
    fn preview_frame(&mut self, frame: &Frame);

    /// Plays the start-up tone.
    fn play_boot_tone(&mut self);

    /// Plays the success chime.
    fn play_success_tone(&mut self);

    /// Plays the error chime.
    fn play_error_tone(&mut self);
}

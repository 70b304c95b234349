// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grayscale camera frames.

/// One 8-bit grayscale frame handed out by a [`CameraSource`](crate::peripheral::CameraSource).
///
/// Frames are owned by the tick that acquired them and go back to the camera
/// through [`CameraSource::release`](crate::peripheral::CameraSource::release)
/// before the tick returns.
///
/// # Examples
///
/// ```
/// use qrprov_lib::types::Frame;
///
/// let frame = Frame::new(4, 2, vec![0; 8]).unwrap();
/// assert_eq!(frame.width(), 4);
/// assert_eq!(frame.pixels().len(), 8);
///
/// // Buffer length must match the dimensions
/// assert!(Frame::new(4, 2, vec![0; 7]).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Wraps a pixel buffer, returning `None` if its length is not `width * height`.
    #[must_use]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = usize::try_from(u64::from(width) * u64::from(height)).ok()?;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Frame width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major luminance values.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(Frame::new(640, 480, vec![0; 640 * 480 - 1]).is_none());
        assert!(Frame::new(640, 480, vec![0; 640 * 480]).is_some());
    }

    #[test]
    fn empty_frame_is_valid() {
        let frame = Frame::new(0, 0, Vec::new()).unwrap();
        assert!(frame.pixels().is_empty());
    }
}

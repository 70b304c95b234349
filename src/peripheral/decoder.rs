// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! QR symbol decoder interface.
//!
//! Decoding is split in two steps: [`SymbolDecoder::detect`] locates the
//! symbols in a frame, then [`SymbolDecoder::decode`] reads one of them. The
//! second step can be repeated with [`Orientation::Mirrored`] when the first
//! attempt fails with a recoverable error.

use std::fmt;

use thiserror::Error;

use crate::types::Frame;

/// How the located symbol grid is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// As captured.
    Normal,
    /// Transposed, for codes seen through a mirror or printed flipped.
    Mirrored,
}

/// Error correction level of a decoded symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EccLevel {
    /// ~15% recovery.
    M,
    /// ~7% recovery.
    L,
    /// ~30% recovery.
    H,
    /// ~25% recovery.
    Q,
}

impl EccLevel {
    /// Maps the two-bit format field (`0..=3`) to a level, in `M L H Q` order.
    #[must_use]
    pub const fn from_format_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::M),
            1 => Some(Self::L),
            2 => Some(Self::H),
            3 => Some(Self::Q),
            _ => None,
        }
    }

    /// Returns the level letter.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Self::M => 'M',
            Self::L => 'L',
            Self::H => 'H',
            Self::Q => 'Q',
        }
    }
}

impl fmt::Display for EccLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A successfully decoded symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// The payload text.
    pub payload: String,
    /// Symbol version (1-40).
    pub version: u8,
    /// Error correction level.
    pub ecc_level: EccLevel,
    /// Mask pattern (0-7).
    pub mask: u8,
}

impl DecodedSymbol {
    /// Creates a decoded symbol with version 1, level M and mask 0.
    #[must_use]
    pub fn from_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            version: 1,
            ecc_level: EccLevel::M,
            mask: 0,
        }
    }
}

/// Why a symbol could not be decoded.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeError {
    /// The located grid has an impossible size.
    #[error("Invalid grid size")]
    InvalidGridSize,
    /// The version field is out of range.
    #[error("Invalid version")]
    InvalidVersion,
    /// The format information could not be corrected.
    #[error("Format data ECC failure")]
    FormatEcc,
    /// The data codewords could not be corrected.
    ///
    /// This is the one class that can succeed after mirroring.
    #[error("ECC failure")]
    DataEcc,
    /// The payload uses an unsupported data mode.
    #[error("Unknown data type")]
    UnknownDataType,
    /// The payload claims more data than the symbol holds.
    #[error("Data overflow")]
    DataOverflow,
    /// The payload ends before its declared length.
    #[error("Data underflow")]
    DataUnderflow,
}

impl DecodeError {
    /// Returns `true` if a mirrored retry may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::DataEcc)
    }
}

/// Locates and decodes QR symbols in camera frames.
pub trait SymbolDecoder {
    /// Locates symbols in `frame` and returns how many were found.
    ///
    /// Indices `0..count` are valid for [`SymbolDecoder::decode`] until the
    /// next call to `detect`.
    fn detect(&mut self, frame: &Frame) -> usize;

    /// Decodes the symbol at `index` read in the given orientation.
    ///
    /// # Errors
    ///
    /// Returns the [`DecodeError`] class reported by the decoder.
    fn decode(
        &mut self,
        index: usize,
        orientation: Orientation,
    ) -> Result<DecodedSymbol, DecodeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_data_ecc_is_recoverable() {
        assert!(DecodeError::DataEcc.is_recoverable());
        for err in [
            DecodeError::InvalidGridSize,
            DecodeError::InvalidVersion,
            DecodeError::FormatEcc,
            DecodeError::UnknownDataType,
            DecodeError::DataOverflow,
            DecodeError::DataUnderflow,
        ] {
            assert!(!err.is_recoverable(), "{err:?}");
        }
    }

    #[test]
    fn ecc_level_letters() {
        let letters: String = (0..4)
            .filter_map(EccLevel::from_format_bits)
            .map(|level| level.as_char())
            .collect();
        assert_eq!(letters, "MLHQ");
        assert_eq!(EccLevel::from_format_bits(4), None);
    }

    #[test]
    fn decode_error_descriptions() {
        assert_eq!(DecodeError::DataEcc.to_string(), "ECC failure");
        assert_eq!(DecodeError::InvalidVersion.to_string(), "Invalid version");
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interfaces to the hardware and services around the provisioner.
//!
//! The provisioner owns one implementation of each trait, bundled in
//! [`Peripherals`]. Board support crates implement them on real hardware;
//! tests implement them with scripted fakes.
//!
//! | Trait | Role |
//! |---|---|
//! | [`CameraSource`] | Grayscale frames |
//! | [`SymbolDecoder`] | QR detection and decoding |
//! | [`Connectivity`] | Wi-Fi station and device restart |
//! | [`CredentialStore`] | Credential persistence |
//! | [`BrokerService`] | On-device message broker |
//! | [`ServiceAdvertiser`] | Host name and service announcement |
//! | [`Presentation`] | Display and speaker |
//! | [`ControlPanel`] | Reset button and touch screen |

mod advertiser;
mod broker;
mod camera;
mod connectivity;
mod decoder;
mod input;
mod presentation;
mod store;

pub use advertiser::{ServiceAdvertiser, ServiceRecord};
pub use broker::BrokerService;
pub use camera::CameraSource;
pub use connectivity::Connectivity;
pub use decoder::{DecodeError, DecodedSymbol, EccLevel, Orientation, SymbolDecoder};
pub use input::ControlPanel;
pub use presentation::Presentation;
pub use store::{CredentialStore, JsonFileStore, MemoryStore};

/// The full set of peripherals a [`Provisioner`](crate::Provisioner) drives.
pub struct Peripherals {
    /// Frame source.
    pub camera: Box<dyn CameraSource>,
    /// QR decoder.
    pub decoder: Box<dyn SymbolDecoder>,
    /// Wi-Fi station.
    pub connectivity: Box<dyn Connectivity>,
    /// Credential persistence.
    pub store: Box<dyn CredentialStore>,
    /// Message broker.
    pub broker: Box<dyn BrokerService>,
    /// Name advertisement.
    pub advertiser: Box<dyn ServiceAdvertiser>,
    /// Display and speaker.
    pub presentation: Box<dyn Presentation>,
    /// Buttons and touch.
    pub controls: Box<dyn ControlPanel>,
}

impl std::fmt::Debug for Peripherals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Peripherals").finish_non_exhaustive()
    }
}

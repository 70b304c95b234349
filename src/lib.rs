// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `QrProv` Lib - Wi-Fi provisioning of headless devices by QR code.
//!
//! A device with a camera and a small display boots without a network,
//! scans a standard `WIFI:` QR code, joins the network it describes and then
//! serves an on-device message broker. This crate holds the logic that ties
//! those steps together; the hardware sits behind the traits in
//! [`peripheral`].
//!
//! # Provisioning Flow
//!
//! - **Unconfigured**: look for a stored credential
//! - **ScanningQRCode**: decode camera frames until a `WIFI:` code appears
//! - **Connecting**: wait for the station to associate
//! - **Connected**: advertise the broker and show the companion-app code
//! - **ConfiguringService**: wait for a broker client or a screen touch
//! - **Servicing**: report broker activity
//!
//! Pressing the reset button in any state erases the stored credential and
//! restarts the device.
//!
//! # Quick Start
//!
//! ## Parsing a Wi-Fi QR payload
//!
//! ```
//! use qrprov_lib::parse;
//!
//! let cred = parse("WIFI:S:MyNet;T:WPA;P:secret;;");
//! assert_eq!(cred.ssid(), "MyNet");
//! assert_eq!(cred.security_type(), "WPA");
//! assert_eq!(cred.password(), "secret");
//!
//! // Anything else parses to an empty credential
//! assert!(parse("hello world").is_empty());
//! ```
//!
//! ## Running the state machine
//!
//! ```ignore
//! use qrprov_lib::{Provisioner, ProvisionerConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> qrprov_lib::Result<()> {
//!     let config = ProvisionerConfig::load("/etc/qrprov.json")?;
//!     let mut provisioner = Provisioner::boot(board::peripherals(), config)?;
//!
//!     let mut events = provisioner.events().subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("{:?}", event.kind);
//!         }
//!     });
//!
//!     provisioner.run().await;
//!     Ok(())
//! }
//! ```

pub mod activity;
pub mod companion;
pub mod config;
pub mod credential;
pub mod error;
pub mod event;
pub mod machine;
pub mod peripheral;
pub mod state;
pub mod types;

pub use activity::{ActivityTracker, BrokerActivity, BrokerObserver};
pub use config::{DisplayGeometry, ProvisionerConfig};
pub use credential::{WifiCredential, parse};
pub use error::{
    AdvertiseError, BrokerError, CameraError, ConfigError, Error, Result, StoreError,
};
pub use event::{EventBus, ProvisioningEvent, ProvisioningEventKind};
pub use machine::{Provisioner, ProvisioningContext, ScanStats, TickOutcome};
pub use peripheral::Peripherals;
pub use state::ProvisioningState;
pub use types::{ConnectivityStatus, Frame, Region};

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wi-Fi credentials and the `WIFI:` QR payload parser.
//!
//! # Examples
//!
//! ```
//! use qrprov_lib::credential::{WifiCredential, parse};
//!
//! let cred = parse(r"WIFI:S:My\;Net;P:pa\:ss");
//! assert_eq!(cred, WifiCredential::new("My;Net", "", "pa:ss"));
//! ```

mod parser;
mod wifi_credential;

pub use parser::{WIFI_SCHEME, escape, parse, unescape};
pub use wifi_credential::WifiCredential;

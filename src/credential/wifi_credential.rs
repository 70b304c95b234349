// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wi-Fi credential record.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::parser::{WIFI_SCHEME, escape};

/// Network credentials extracted from a QR code or loaded from storage.
///
/// All fields default to the empty string. An empty SSID means "no
/// credential found"; see [`WifiCredential::has_ssid`].
///
/// The [`Debug`] implementation never prints the password.
///
/// # Examples
///
/// ```
/// use qrprov_lib::credential::WifiCredential;
///
/// let cred = WifiCredential::new("MyNet", "WPA", "secret");
/// assert_eq!(cred.ssid(), "MyNet");
/// assert!(cred.has_ssid());
///
/// assert!(!WifiCredential::default().has_ssid());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WifiCredential {
    #[serde(default)]
    ssid: String,
    #[serde(default, rename = "type")]
    security_type: String,
    #[serde(default)]
    password: String,
}

impl WifiCredential {
    /// Creates a credential from its three parts.
    #[must_use]
    pub fn new(
        ssid: impl Into<String>,
        security_type: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            ssid: ssid.into(),
            security_type: security_type.into(),
            password: password.into(),
        }
    }

    /// Returns the network name.
    #[must_use]
    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    /// Returns the security type as written in the payload (`WPA`, `WEP`, `nopass`, ...).
    #[must_use]
    pub fn security_type(&self) -> &str {
        &self.security_type
    }

    /// Returns the network password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns `true` if the credential names a network.
    #[must_use]
    pub fn has_ssid(&self) -> bool {
        !self.ssid.is_empty()
    }

    /// Returns `true` if every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ssid.is_empty() && self.security_type.is_empty() && self.password.is_empty()
    }

    pub(crate) fn set_ssid(&mut self, ssid: String) {
        self.ssid = ssid;
    }

    pub(crate) fn set_security_type(&mut self, security_type: String) {
        self.security_type = security_type;
    }

    pub(crate) fn set_password(&mut self, password: String) {
        self.password = password;
    }

    /// Encodes the credential as a `WIFI:` QR payload.
    ///
    /// Empty fields are omitted. The output parses back to an equal record,
    /// except when the last non-empty value ends in `;`: the parser strips
    /// trailing separators before resolving escapes.
    ///
    /// # Examples
    ///
    /// ```
    /// use qrprov_lib::credential::{WifiCredential, parse};
    ///
    /// let cred = WifiCredential::new("Cafe;Guest", "WPA", "p:w");
    /// let text = cred.to_qr_text();
    /// assert_eq!(text, r"WIFI:S:Cafe\;Guest;T:WPA;P:p\:w;;");
    /// assert_eq!(parse(&text), cred);
    /// ```
    #[must_use]
    pub fn to_qr_text(&self) -> String {
        let mut text = String::from(WIFI_SCHEME);
        for (key, value) in [
            ('S', &self.ssid),
            ('T', &self.security_type),
            ('P', &self.password),
        ] {
            if !value.is_empty() {
                text.push(key);
                text.push(':');
                text.push_str(&escape(value));
                text.push(';');
            }
        }
        text.push(';');
        text
    }
}

impl fmt::Debug for WifiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifiCredential")
            .field("ssid", &self.ssid)
            .field("security_type", &self.security_type)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

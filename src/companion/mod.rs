// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Companion-app configuration document.
//!
//! Once the device is online it shows a QR code that points a phone-side
//! sensor logger at the on-device broker. The QR text is a deep link whose
//! query carries the JSON document built here.
//!
//! # Examples
//!
//! ```
//! use std::net::{IpAddr, Ipv4Addr};
//! use qrprov_lib::companion::{CompanionConfig, CompanionSettings};
//!
//! let settings = CompanionSettings::default();
//! let addr = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 42));
//! let doc = CompanionConfig::for_broker(addr, 1883, &settings);
//!
//! assert_eq!(doc.mqtt.url, "192.168.1.42");
//! assert_eq!(doc.mqtt.port, "1883");
//!
//! let link = doc.to_link(&settings.link_base).unwrap();
//! assert!(link.starts_with(&settings.link_base));
//! ```

use std::collections::BTreeMap;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tunables for the companion document, part of
/// [`ProvisionerConfig`](crate::ProvisionerConfig).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionSettings {
    /// Prefix of the deep link; the encoded document is appended to it.
    pub link_base: String,
    /// Topic filter the app subscribes to on the device broker.
    pub subscribe_topic: String,
    /// Sampling period for the barometer and location sensors.
    pub sensor_period_ms: u32,
    /// Microphone capture mode.
    pub microphone_mode: String,
}

impl Default for CompanionSettings {
    fn default() -> Self {
        Self {
            link_base: "https://sensorlogger.app/link/config?data=".to_string(),
            subscribe_topic: "#".to_string(),
            sensor_period_ms: 1000,
            microphone_mode: "lossless".to_string(),
        }
    }
}

/// Sampling rate of a sensor: a period in milliseconds or a named mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorSpeed {
    /// Sampling period in milliseconds.
    Millis(u32),
    /// Named capture mode (e.g. `"lossless"`).
    Named(String),
}

/// Per-sensor settings in the companion document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorSetting {
    /// Whether the app records this sensor.
    pub enabled: bool,
    /// How fast it samples.
    pub speed: SensorSpeed,
}

/// Broker section of the companion document.
///
/// The app's own HTTP push stays disabled; the device broker is reached over
/// plain TCP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MqttSection {
    /// Whether the app publishes to the broker right away.
    pub enabled: bool,
    /// Broker host, the device's station address.
    pub url: String,
    /// Broker port, as a string like the app expects.
    pub port: String,
    /// TLS on the broker connection.
    pub tls: bool,
    /// `"TCP"` or `"WebSocket"`.
    pub connection_type: String,
    /// Topic filter the app subscribes to.
    pub subscribe_topic: String,
    /// Whether the app subscribes at all.
    pub subscribe_enabled: bool,
    /// Skip the app's own connection test.
    pub skip: bool,
    /// Client identifier the app presents to the broker.
    pub client_id: String,
}

/// The document rendered as a QR code once the broker is up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionConfig {
    /// Sensor name to settings.
    pub sensor_state: BTreeMap<String, SensorSetting>,
    /// Broker connection settings.
    pub mqtt: MqttSection,
}

impl CompanionConfig {
    /// Builds the document for a broker listening on `address:mqtt_port`.
    #[must_use]
    pub fn for_broker(address: IpAddr, mqtt_port: u16, settings: &CompanionSettings) -> Self {
        let periodic = || SensorSetting {
            enabled: true,
            speed: SensorSpeed::Millis(settings.sensor_period_ms),
        };

        let mut sensor_state = BTreeMap::new();
        sensor_state.insert("Barometer".to_string(), periodic());
        sensor_state.insert("Location".to_string(), periodic());
        sensor_state.insert(
            "Microphone".to_string(),
            SensorSetting {
                enabled: true,
                speed: SensorSpeed::Named(settings.microphone_mode.clone()),
            },
        );

        Self {
            sensor_state,
            mqtt: MqttSection {
                enabled: false,
                url: address.to_string(),
                port: mqtt_port.to_string(),
                tls: false,
                connection_type: "TCP".to_string(),
                subscribe_topic: settings.subscribe_topic.clone(),
                subscribe_enabled: true,
                skip: false,
                client_id: format!("sensorlogger-{}", Uuid::new_v4().simple()),
            },
        }
    }

    /// Serializes the document as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Builds the deep link: `base` followed by the percent-encoded JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_link(&self, base: &str) -> Result<String, serde_json::Error> {
        let json = self.to_json()?;
        Ok(format!("{base}{}", urlencoding::encode(&json)))
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    fn doc() -> CompanionConfig {
        CompanionConfig::for_broker(
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)),
            1883,
            &CompanionSettings::default(),
        )
    }

    #[test]
    fn json_uses_app_field_names() {
        let value: serde_json::Value = serde_json::from_str(&doc().to_json().unwrap()).unwrap();

        assert_eq!(value["mqtt"]["url"], "10.0.0.7");
        assert_eq!(value["mqtt"]["port"], "1883");
        assert_eq!(value["mqtt"]["connectionType"], "TCP");
        assert_eq!(value["mqtt"]["subscribeTopic"], "#");
        assert_eq!(value["mqtt"]["subscribeEnabled"], true);
        assert_eq!(value["mqtt"]["enabled"], false);
        assert_eq!(value["mqtt"]["tls"], false);
        assert_eq!(value["sensorState"]["Barometer"]["speed"], 1000);
        assert_eq!(value["sensorState"]["Location"]["enabled"], true);
        assert_eq!(value["sensorState"]["Microphone"]["speed"], "lossless");
    }

    #[test]
    fn client_ids_are_unique() {
        assert_ne!(doc().mqtt.client_id, doc().mqtt.client_id);
    }

    #[test]
    fn link_is_percent_encoded() {
        let config = doc();
        let link = config.to_link("app://cfg?d=").unwrap();
        let encoded = link.strip_prefix("app://cfg?d=").unwrap();

        assert!(!encoded.contains('{'));
        assert!(!encoded.contains('"'));

        let decoded = urlencoding::decode(encoded).unwrap();
        let back: CompanionConfig = serde_json::from_str(&decoded).unwrap();
        assert_eq!(back, config);
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Provisioner configuration.
//!
//! Every field has a default, so a configuration file only needs the values
//! it overrides.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use qrprov_lib::ProvisionerConfig;
//!
//! let config = ProvisionerConfig::from_json_str(r#"{"hostname": "lab-broker"}"#).unwrap();
//! assert_eq!(config.hostname, "lab-broker");
//! assert_eq!(config.mqtt_port, 1883);
//! assert_eq!(config.success_settle(), Duration::from_secs(3));
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::companion::CompanionSettings;
use crate::error::ConfigError;
use crate::types::Region;

/// Display dimensions and the gap left above the log area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayGeometry {
    /// Display width in pixels.
    pub width: u32,
    /// Display height in pixels.
    pub height: u32,
    /// Vertical gap between the upper half and the log area.
    pub vspace: u32,
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            vspace: 5,
        }
    }
}

impl DisplayGeometry {
    /// Log area used while provisioning: the lower half, below `vspace`.
    #[must_use]
    pub fn provisioning_log_region(&self) -> Region {
        let half = self.height / 2;
        Region::new(
            0,
            half + self.vspace,
            self.width,
            half.saturating_sub(self.vspace),
        )
    }

    /// Log area used once a client is being served: the whole screen.
    #[must_use]
    pub fn full_screen(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }
}

/// Configuration for a [`Provisioner`](crate::Provisioner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionerConfig {
    /// Host name announced on the local network.
    pub hostname: String,
    /// Broker TCP port.
    pub mqtt_port: u16,
    /// Broker WebSocket port.
    pub websocket_port: u16,
    /// Cadence of [`Provisioner::run`](crate::Provisioner::run).
    pub tick_interval_ms: u64,
    /// Pause after a successful decode.
    pub success_settle_ms: u64,
    /// Pause after a failed decode.
    pub failure_settle_ms: u64,
    /// Pause between erasing credentials and restarting.
    pub reset_delay_ms: u64,
    /// Display layout.
    pub display: DisplayGeometry,
    /// Companion document settings.
    pub companion: CompanionSettings,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            hostname: "picomqtt".to_string(),
            mqtt_port: 1883,
            websocket_port: 81,
            tick_interval_ms: 20,
            success_settle_ms: 3000,
            failure_settle_ms: 500,
            reset_delay_ms: 300,
            display: DisplayGeometry::default(),
            companion: CompanionSettings::default(),
        }
    }
}

impl ProvisionerConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is malformed, or contains
    /// an out-of-range value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::info!(path = %path.display(), "Loaded provisioner configuration");
        Ok(config)
    }

    /// Checks values that serde cannot constrain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hostname.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "hostname",
                message: "must not be empty".to_string(),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_interval_ms",
                message: "must be positive".to_string(),
            });
        }
        if self.display.height / 2 <= self.display.vspace {
            return Err(ConfigError::InvalidValue {
                field: "display.vspace",
                message: format!(
                    "{} leaves no log area on a {} pixel display",
                    self.display.vspace, self.display.height
                ),
            });
        }
        Ok(())
    }

    /// Sets the announced host name.
    #[must_use]
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Sets both settling pauses.
    #[must_use]
    pub fn with_settle_delays(mut self, success: Duration, failure: Duration) -> Self {
        self.success_settle_ms = duration_ms(success);
        self.failure_settle_ms = duration_ms(failure);
        self
    }

    /// Sets the pause before restarting after a reset.
    #[must_use]
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay_ms = duration_ms(delay);
        self
    }

    /// Sets the display layout.
    #[must_use]
    pub fn with_display(mut self, display: DisplayGeometry) -> Self {
        self.display = display;
        self
    }

    /// Tick cadence.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Pause after a successful decode.
    #[must_use]
    pub fn success_settle(&self) -> Duration {
        Duration::from_millis(self.success_settle_ms)
    }

    /// Pause after a failed decode.
    #[must_use]
    pub fn failure_settle(&self) -> Duration {
        Duration::from_millis(self.failure_settle_ms)
    }

    /// Pause between erase and restart.
    #[must_use]
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

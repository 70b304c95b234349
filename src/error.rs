// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the provisioning library.
//!
//! Only [`CameraError`] is fatal: it aborts [`Provisioner::boot`](crate::Provisioner::boot).
//! Every other failure that happens while ticking is logged, rendered on the
//! presentation surface and then dropped.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The camera could not be brought up.
    #[error("camera error: {0}")]
    Camera(#[from] CameraError),

    /// The credential store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The broker service failed.
    #[error("broker error: {0}")]
    Broker(#[from] BrokerError),

    /// Network name advertisement failed.
    #[error("advertise error: {0}")]
    Advertise(#[from] AdvertiseError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Camera bring-up failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// The sensor did not respond during initialisation.
    #[error("camera init failed: {0}")]
    InitFailed(String),

    /// The sensor does not support the requested pixel format.
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),
}

/// Credential store failures.
///
/// The state machine treats these as "no credential" when reading.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be decoded.
    #[error("corrupt credential data: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The backend reported an error of its own.
    #[error("{0}")]
    Backend(String),
}

/// Broker service failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrokerError {
    /// A listener could not be bound.
    #[error("failed to bind port {port}: {message}")]
    Bind {
        /// The port that could not be bound.
        port: u16,
        /// Description of the failure.
        message: String,
    },

    /// The service was started twice.
    #[error("broker already running")]
    AlreadyRunning,
}

/// Network name advertisement failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdvertiseError {
    /// The responder could not claim the host name.
    #[error("host name {0} unavailable")]
    HostnameUnavailable(String),

    /// A service record was rejected.
    #[error("service {service} rejected: {message}")]
    ServiceRejected {
        /// The rejected service type.
        service: String,
        /// Description of the failure.
        message: String,
    },
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for this schema.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is outside its allowed range.
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_error_display() {
        let err = CameraError::InitFailed("no sensor on bus".to_string());
        assert_eq!(err.to_string(), "camera init failed: no sensor on bus");
    }

    #[test]
    fn error_from_camera_error() {
        let err: Error = CameraError::UnsupportedFormat("RGB565".to_string()).into();
        assert!(matches!(err, Error::Camera(CameraError::UnsupportedFormat(_))));
    }

    #[test]
    fn broker_bind_display() {
        let err = BrokerError::Bind {
            port: 1883,
            message: "address in use".to_string(),
        };
        assert_eq!(err.to_string(), "failed to bind port 1883: address in use");
    }

    #[test]
    fn config_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            field: "tick_interval_ms",
            message: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for tick_interval_ms: must be positive"
        );
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The provisioning state machine.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use super::{ProvisioningContext, ScanStats};
use crate::activity::{ActivityTracker, BrokerActivity};
use crate::companion::CompanionConfig;
use crate::config::ProvisionerConfig;
use crate::credential::WifiCredential;
use crate::error::Result;
use crate::event::{EventBus, ProvisioningEventKind};
use crate::peripheral::{Peripherals, ServiceRecord};
use crate::state::ProvisioningState;
use crate::types::ConnectivityStatus;

/// What a call to [`Provisioner::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick ran; `entered` is the state whose entry actions fired, if any.
    Ran {
        /// State entered during this tick.
        entered: Option<ProvisioningState>,
    },
    /// Skipped because a settling pause is in progress.
    Settling {
        /// Time left in the pause.
        remaining: Duration,
    },
    /// Credentials were erased; waiting out the reset delay.
    ResetPending,
    /// The device restart was issued. Later ticks do nothing.
    Restarted,
}

/// Drives a headless device from "no network" to "serving broker clients".
///
/// The provisioner owns its [`Peripherals`] and a [`ProvisioningContext`].
/// Call [`Provisioner::tick`] at a fixed cadence, or hand control to
/// [`Provisioner::run`]. A tick never blocks: settling pauses and the reset
/// delay are deadlines checked by later ticks.
///
/// # Examples
///
/// ```ignore
/// use qrprov_lib::{Provisioner, ProvisionerConfig};
///
/// let peripherals = board::peripherals();
/// let mut provisioner = Provisioner::boot(peripherals, ProvisionerConfig::default())?;
/// provisioner.run().await;
/// ```
pub struct Provisioner {
    pub(super) peripherals: Peripherals,
    pub(super) config: ProvisionerConfig,
    pub(super) context: ProvisioningContext,
    pub(super) tracker: ActivityTracker,
    pub(super) events: EventBus,
}

impl Provisioner {
    /// Brings up the camera and the log area.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Camera`](crate::Error::Camera) if the camera cannot be
    /// initialised. The message is shown on the display first; the device is
    /// expected to halt.
    pub fn boot(mut peripherals: Peripherals, config: ProvisionerConfig) -> Result<Self> {
        peripherals.presentation.play_boot_tone();
        peripherals
            .presentation
            .resize_log_region(config.display.provisioning_log_region());

        if let Err(e) = peripherals.camera.init() {
            tracing::error!(error = %e, "Camera init failed, halting");
            peripherals.presentation.log_line("Camera init failed");
            return Err(e.into());
        }

        tracing::info!(hostname = %config.hostname, "Provisioner booted");
        Ok(Self {
            peripherals,
            config,
            context: ProvisioningContext::new(),
            tracker: ActivityTracker::new(),
            events: EventBus::new(),
        })
    }

    /// Replaces the event bus, e.g. to share one created earlier.
    #[must_use]
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ProvisioningState {
        self.context.state()
    }

    /// The state carried between ticks.
    #[must_use]
    pub fn context(&self) -> &ProvisioningContext {
        &self.context
    }

    /// Scan counters.
    #[must_use]
    pub fn stats(&self) -> ScanStats {
        self.context.stats()
    }

    /// Event stream for this provisioner.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Broker activity observer; register callbacks on it.
    #[must_use]
    pub fn activity(&self) -> &ActivityTracker {
        &self.tracker
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &ProvisionerConfig {
        &self.config
    }

    /// Runs one scheduling step at time `now`.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.context.restart_at.is_some() {
            return self.finish_reset(now);
        }
        if self.context.settle.is_pending(now) {
            return TickOutcome::Settling {
                remaining: self.context.settle.remaining(now),
            };
        }

        if self.peripherals.controls.reset_clicked() {
            self.begin_reset(now);
            return self.finish_reset(now);
        }

        self.track_connectivity();
        let entered = self.run_entry_actions();
        if self.context.state.is_scanning() {
            self.scan_for_credentials(now);
        }
        self.pump_broker();
        self.evaluate_exit();

        TickOutcome::Ran { entered }
    }

    /// Ticks at the configured cadence until the device restart is issued.
    pub async fn run(&mut self) {
        let mut interval = tokio::time::interval(self.config.tick_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if self.tick(Instant::now()) == TickOutcome::Restarted {
                tracing::info!("Provisioner stopped for restart");
                return;
            }
        }
    }

    pub(super) fn log(&mut self, line: &str) {
        tracing::debug!(line, "Log line");
        self.peripherals.presentation.log_line(line);
    }

    fn track_connectivity(&mut self) {
        let status = self.peripherals.connectivity.status();
        let Some(status) = self.context.connectivity.observe(status) else {
            return;
        };

        let line = match status {
            ConnectivityStatus::Connected => {
                let address = self
                    .peripherals
                    .connectivity
                    .local_address()
                    .map_or_else(|| "unknown".to_string(), |addr| addr.to_string());
                format!("WiFi: connected, IP {address}")
            }
            ConnectivityStatus::NoTargetFound => {
                format!("WiFi: SSID {} not found", self.context.credential.ssid())
            }
            ConnectivityStatus::Disconnected => "WiFi: disconnected".to_string(),
            other => format!("WiFi: {other}"),
        };
        tracing::info!(%status, "Connectivity changed");
        self.log(&line);
        self.events
            .emit(ProvisioningEventKind::ConnectivityChanged { status });

        if status.is_connected() && self.context.state == ProvisioningState::Connecting {
            self.context.transition(ProvisioningState::Connected);
        }
    }

    fn run_entry_actions(&mut self) -> Option<ProvisioningState> {
        let previous = self.context.entries.last();
        let state = self.context.entries.observe(self.context.state)?;

        match state {
            ProvisioningState::Unconfigured => {}
            ProvisioningState::ScanningQRCode => self.log("point camera at WiFi QR code:"),
            ProvisioningState::Connecting => {
                let line = format!("trying SSID {}", self.context.credential.ssid());
                self.log(&line);
            }
            ProvisioningState::Connected => self.enter_connected(),
            ProvisioningState::ConfiguringService => {
                self.log("awaiting service configuration");
            }
            ProvisioningState::Servicing => self.log("serving client"),
            ProvisioningState::ConnectFailed => {
                let line = format!("could not join {}", self.context.credential.ssid());
                self.log(&line);
            }
        }

        self.events
            .emit(ProvisioningEventKind::StateEntered { state, previous });
        Some(state)
    }

    /// Starts advertisement and the broker, shows the companion code, and
    /// moves on to `ConfiguringService` without waiting for a tick.
    fn enter_connected(&mut self) {
        self.peripherals.presentation.clear();

        let services = [
            ServiceRecord::tcp("mqtt", self.config.mqtt_port, "MQTT/TCP broker"),
            ServiceRecord::tcp(
                "mqtt-ws",
                self.config.websocket_port,
                "MQTT/Websockets broker",
            ),
        ];
        if let Err(e) = self
            .peripherals
            .advertiser
            .advertise(&self.config.hostname, &services)
        {
            tracing::warn!(error = %e, "Name advertisement failed");
            self.log(&format!("mDNS: {e}"));
        }

        let observer = Arc::new(self.tracker.clone());
        match self.peripherals.broker.start(observer) {
            Ok(()) => {
                self.context.broker_started = true;
                tracing::info!(port = self.config.mqtt_port, "Broker started");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Broker failed to start");
                self.log(&format!("broker: {e}"));
            }
        }

        self.show_companion_code();
        self.log("connected");
        self.context.transition(ProvisioningState::ConfiguringService);
    }

    fn show_companion_code(&mut self) {
        let Some(address) = self.peripherals.connectivity.local_address() else {
            tracing::warn!("No station address, skipping companion code");
            return;
        };

        let document =
            CompanionConfig::for_broker(address, self.config.mqtt_port, &self.config.companion);
        match document.to_link(&self.config.companion.link_base) {
            Ok(link) => {
                tracing::debug!(len = link.len(), "Rendering companion code");
                self.peripherals.presentation.render_qr(&link);
            }
            Err(e) => tracing::warn!(error = %e, "Failed to encode companion document"),
        }
    }

    fn pump_broker(&mut self) {
        self.peripherals.broker.pump();
        for notice in self.tracker.drain_notices() {
            self.log(&notice.to_string());
        }
    }

    fn evaluate_exit(&mut self) {
        match self.context.state {
            ProvisioningState::Unconfigured => self.leave_unconfigured(),
            ProvisioningState::ConfiguringService => {
                let activity = self.tracker.activity();
                let touched = self.peripherals.controls.touched();
                if activity.any() || touched {
                    self.enter_servicing(activity, touched);
                }
            }
            _ => {}
        }
    }

    fn leave_unconfigured(&mut self) {
        let stored = match self.peripherals.store.read_persisted() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "Credential store unreadable, treating as empty");
                None
            }
        };

        match stored {
            Some(credential) => {
                tracing::info!(ssid = %credential.ssid(), "Using stored credential");
                self.log("Click reset button to erase WiFi config");
                self.request_connection(credential);
            }
            None => {
                tracing::info!("No stored credential, scanning for a QR code");
                self.context.transition(ProvisioningState::ScanningQRCode);
            }
        }
    }

    /// Starts association with `credential` and enters `Connecting`.
    pub(super) fn request_connection(&mut self, credential: WifiCredential) {
        self.peripherals
            .connectivity
            .connect(credential.ssid(), credential.password());
        self.context.credential = credential;
        self.context.transition(ProvisioningState::Connecting);
    }

    fn enter_servicing(&mut self, activity: BrokerActivity, touched: bool) {
        tracing::info!(?activity, touched, "Leaving service configuration");
        self.peripherals
            .presentation
            .resize_log_region(self.config.display.full_screen());
        if !touched {
            self.log("MQTT client seen");
        }
        self.context.transition(ProvisioningState::Servicing);
    }

    fn begin_reset(&mut self, now: Instant) {
        tracing::warn!(state = %self.context.state, "Reset requested, erasing credentials");
        self.log("erasing WiFi config");

        self.peripherals.connectivity.erase_credentials();
        if let Err(e) = self.peripherals.store.erase() {
            tracing::warn!(error = %e, "Failed to erase stored credential");
        }
        self.peripherals.connectivity.disconnect();

        self.log("rebooting..");
        self.events.emit(ProvisioningEventKind::ResetRequested);
        self.context.restart_at = Some(now + self.config.reset_delay());
    }

    fn finish_reset(&mut self, now: Instant) -> TickOutcome {
        if self.context.restarted {
            return TickOutcome::Restarted;
        }
        match self.context.restart_at {
            Some(at) if now >= at => {
                tracing::info!("Restarting device");
                self.peripherals.connectivity.restart_device();
                self.context.restarted = true;
                TickOutcome::Restarted
            }
            _ => TickOutcome::ResetPending,
        }
    }
}

impl std::fmt::Debug for Provisioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provisioner")
            .field("context", &self.context)
            .field("activity", &self.tracker)
            .finish_non_exhaustive()
    }
}

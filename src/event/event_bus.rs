// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast channel for provisioning events.

use tokio::sync::broadcast;

use super::{ProvisioningEvent, ProvisioningEventKind};

const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Broadcasts provisioning events to any number of subscribers.
///
/// Capacity is fixed (default 64). A subscriber that falls behind loses the
/// oldest events and sees `RecvError::Lagged`; the provisioner never waits
/// for subscribers. Clones publish into the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ProvisioningEvent>,
}

impl EventBus {
    /// Creates a bus holding up to 64 undelivered events per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a bus holding up to `capacity` undelivered events per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Returns a receiver for events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ProvisioningEvent> {
        self.sender.subscribe()
    }

    /// Number of live receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes `event`; dropped silently when nobody listens.
    pub fn publish(&self, event: ProvisioningEvent) {
        let _ = self.sender.send(event);
    }

    /// Stamps `kind` with the current time and publishes it.
    pub fn emit(&self, kind: ProvisioningEventKind) {
        self.publish(ProvisioningEvent::now(kind));
    }

    /// Publishes `event` and returns how many receivers got it.
    #[must_use]
    pub fn publish_counted(&self, event: ProvisioningEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ProvisioningState;

    fn entered(state: ProvisioningState) -> ProvisioningEvent {
        ProvisioningEvent::now(ProvisioningEventKind::StateEntered {
            state,
            previous: None,
        })
    }

    #[test]
    fn subscriber_count_tracks_receivers() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);

        let rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(rx1);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn publish_delivers_to_every_subscriber() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(entered(ProvisioningState::Connecting));

        assert_eq!(
            rx1.recv().await.unwrap().entered_state(),
            Some(ProvisioningState::Connecting)
        );
        assert_eq!(
            rx2.recv().await.unwrap().entered_state(),
            Some(ProvisioningState::Connecting)
        );
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(entered(ProvisioningState::Servicing));
        assert_eq!(bus.publish_counted(entered(ProvisioningState::Servicing)), 0);
    }

    #[test]
    fn clone_shares_same_channel() {
        let bus1 = EventBus::with_capacity(4);
        let bus2 = bus1.clone();

        let _rx = bus1.subscribe();
        assert_eq!(bus2.publish_counted(entered(ProvisioningState::Connected)), 1);
    }

    #[test]
    fn emit_stamps_and_publishes() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.emit(ProvisioningEventKind::ResetRequested);
        assert_eq!(rx.try_recv().unwrap().kind, ProvisioningEventKind::ResetRequested);
    }

    #[test]
    fn slow_subscriber_lags() {
        let bus = EventBus::with_capacity(2);
        let mut rx = bus.subscribe();
        for _ in 0..3 {
            bus.publish(entered(ProvisioningState::Connecting));
        }
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
    }
}

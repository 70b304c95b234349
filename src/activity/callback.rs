// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback registry for broker client events.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Unique identifier for a callback registration.
///
/// Returned by the `on_*` methods and accepted by
/// [`ActivityCallbacks::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Client connect/disconnect callbacks (receive the client id).
type ClientCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Subscribe/unsubscribe callbacks (receive client id and topic).
type TopicCallback = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// Message callbacks (receive the topic).
type MessageCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Registry of user callbacks for broker client events.
///
/// Thread-safe through `parking_lot::RwLock`; callbacks run synchronously
/// on the thread that dispatches the event.
pub struct ActivityCallbacks {
    next_id: AtomicU64,
    connected: RwLock<HashMap<SubscriptionId, ClientCallback>>,
    disconnected: RwLock<HashMap<SubscriptionId, ClientCallback>>,
    subscribed: RwLock<HashMap<SubscriptionId, TopicCallback>>,
    unsubscribed: RwLock<HashMap<SubscriptionId, TopicCallback>>,
    message: RwLock<HashMap<SubscriptionId, MessageCallback>>,
}

impl ActivityCallbacks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            connected: RwLock::new(HashMap::new()),
            disconnected: RwLock::new(HashMap::new()),
            subscribed: RwLock::new(HashMap::new()),
            unsubscribed: RwLock::new(HashMap::new()),
            message: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a callback for client connections.
    pub fn on_client_connected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.connected.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for client disconnections.
    pub fn on_client_disconnected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.disconnected.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for new subscriptions.
    pub fn on_client_subscribed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.subscribed.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for dropped subscriptions.
    pub fn on_client_unsubscribed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.unsubscribed.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for published messages.
    pub fn on_message<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.message.write().insert(id, Arc::new(callback));
        id
    }

    /// Unregisters a callback. Returns `true` if one was removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.connected.write().remove(&id).is_some()
            || self.disconnected.write().remove(&id).is_some()
            || self.subscribed.write().remove(&id).is_some()
            || self.unsubscribed.write().remove(&id).is_some()
            || self.message.write().remove(&id).is_some()
    }

    /// Removes every callback.
    pub fn clear(&self) {
        self.connected.write().clear();
        self.disconnected.write().clear();
        self.subscribed.write().clear();
        self.unsubscribed.write().clear();
        self.message.write().clear();
    }

    /// Total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.connected.read().len()
            + self.disconnected.read().len()
            + self.subscribed.read().len()
            + self.unsubscribed.read().len()
            + self.message.read().len()
    }

    /// Returns `true` if no callback is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }

    pub(crate) fn dispatch_connected(&self, client_id: &str) {
        for callback in self.connected.read().values() {
            callback(client_id);
        }
    }

    pub(crate) fn dispatch_disconnected(&self, client_id: &str) {
        for callback in self.disconnected.read().values() {
            callback(client_id);
        }
    }

    pub(crate) fn dispatch_subscribed(&self, client_id: &str, topic: &str) {
        for callback in self.subscribed.read().values() {
            callback(client_id, topic);
        }
    }

    pub(crate) fn dispatch_unsubscribed(&self, client_id: &str, topic: &str) {
        for callback in self.unsubscribed.read().values() {
            callback(client_id, topic);
        }
    }

    pub(crate) fn dispatch_message(&self, topic: &str) {
        for callback in self.message.read().values() {
            callback(topic);
        }
    }
}

impl Default for ActivityCallbacks {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ActivityCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityCallbacks")
            .field("callback_count", &self.callback_count())
            .finish_non_exhaustive()
    }
}

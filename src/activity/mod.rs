// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broker client activity.
//!
//! The broker reports client events through the [`BrokerObserver`] hooks.
//! [`ActivityTracker`] is the observer the provisioner registers: it keeps
//! the connection, subscription and message counters, queues readable
//! notices for the log, and forwards events to user callbacks.
//!
//! # Examples
//!
//! ```
//! use qrprov_lib::activity::{ActivityTracker, BrokerObserver};
//!
//! let tracker = ActivityTracker::new();
//! tracker.callbacks().on_client_connected(|client| println!("{client} joined"));
//!
//! tracker.on_connected("phone");
//! tracker.on_subscribe("phone", "sensors/#");
//!
//! let activity = tracker.activity();
//! assert_eq!(activity.connections, 1);
//! assert_eq!(activity.subscriptions, 1);
//! assert!(activity.any());
//! ```

mod callback;
mod tracker;

pub use callback::{ActivityCallbacks, SubscriptionId};
pub use tracker::{ActivityTracker, BrokerActivity, BrokerNotice};

/// Hooks a broker calls as clients come and go.
///
/// Implementations must be cheap and must not block: brokers call them from
/// inside [`BrokerService::pump`](crate::peripheral::BrokerService::pump).
pub trait BrokerObserver: Send + Sync {
    /// A client completed its handshake.
    fn on_connected(&self, client_id: &str);

    /// A client went away.
    fn on_disconnected(&self, client_id: &str);

    /// A client subscribed to `topic`.
    fn on_subscribe(&self, client_id: &str, topic: &str);

    /// A client dropped its subscription to `topic`.
    fn on_unsubscribe(&self, client_id: &str, topic: &str);

    /// A message was published on `topic`.
    fn on_message(&self, topic: &str);
}

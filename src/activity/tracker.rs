// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broker activity counters and notices.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use parking_lot::Mutex;

use super::{ActivityCallbacks, BrokerObserver};

/// Notices beyond this many are dropped, oldest first, until drained.
const NOTICE_CAPACITY: usize = 64;

/// Snapshot of the broker counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrokerActivity {
    /// Currently connected clients.
    pub connections: u32,
    /// Currently active subscriptions.
    pub subscriptions: u32,
    /// Messages seen since start.
    pub messages: u64,
}

impl BrokerActivity {
    /// Returns `true` if any counter is non-zero.
    #[must_use]
    pub fn any(&self) -> bool {
        self.connections > 0 || self.subscriptions > 0 || self.messages > 0
    }
}

/// A client event worth showing in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokerNotice {
    /// A client connected.
    Connected {
        /// Client identifier.
        client_id: String,
    },
    /// A client disconnected.
    Disconnected {
        /// Client identifier.
        client_id: String,
    },
    /// A client subscribed.
    Subscribed {
        /// Client identifier.
        client_id: String,
        /// Topic filter.
        topic: String,
    },
    /// A client unsubscribed.
    Unsubscribed {
        /// Client identifier.
        client_id: String,
        /// Topic filter.
        topic: String,
    },
}

impl fmt::Display for BrokerNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected { client_id } => write!(f, "client {client_id} connected"),
            Self::Disconnected { client_id } => write!(f, "client {client_id} disconnected"),
            Self::Subscribed { client_id, topic } => {
                write!(f, "client {client_id} subscribed {topic}")
            }
            Self::Unsubscribed { client_id, topic } => {
                write!(f, "client {client_id} unsubscribed {topic}")
            }
        }
    }
}

/// The [`BrokerObserver`] the provisioner registers with its broker.
///
/// Cheaply cloneable; clones share counters, notices and callbacks.
#[derive(Clone, Default)]
pub struct ActivityTracker {
    inner: Arc<TrackerInner>,
}

#[derive(Default)]
struct TrackerInner {
    connections: AtomicU32,
    subscriptions: AtomicU32,
    messages: AtomicU64,
    notices: Mutex<VecDeque<BrokerNotice>>,
    callbacks: ActivityCallbacks,
}

impl ActivityTracker {
    /// Creates a tracker with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter values.
    #[must_use]
    pub fn activity(&self) -> BrokerActivity {
        BrokerActivity {
            connections: self.inner.connections.load(Ordering::Acquire),
            subscriptions: self.inner.subscriptions.load(Ordering::Acquire),
            messages: self.inner.messages.load(Ordering::Acquire),
        }
    }

    /// User callbacks fired on every event.
    #[must_use]
    pub fn callbacks(&self) -> &ActivityCallbacks {
        &self.inner.callbacks
    }

    /// Takes all queued notices, oldest first.
    #[must_use]
    pub fn drain_notices(&self) -> Vec<BrokerNotice> {
        self.inner.notices.lock().drain(..).collect()
    }

    fn push_notice(&self, notice: BrokerNotice) {
        let mut notices = self.inner.notices.lock();
        if notices.len() == NOTICE_CAPACITY {
            let dropped = notices.pop_front();
            tracing::trace!(?dropped, "Notice queue full, dropping oldest");
        }
        notices.push_back(notice);
    }
}

fn saturating_decrement(counter: &AtomicU32) {
    let _ = counter.fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
}

impl BrokerObserver for ActivityTracker {
    fn on_connected(&self, client_id: &str) {
        self.inner.connections.fetch_add(1, Ordering::AcqRel);
        tracing::debug!(client_id, "Broker client connected");
        self.push_notice(BrokerNotice::Connected {
            client_id: client_id.to_string(),
        });
        self.inner.callbacks.dispatch_connected(client_id);
    }

    fn on_disconnected(&self, client_id: &str) {
        saturating_decrement(&self.inner.connections);
        tracing::debug!(client_id, "Broker client disconnected");
        self.push_notice(BrokerNotice::Disconnected {
            client_id: client_id.to_string(),
        });
        self.inner.callbacks.dispatch_disconnected(client_id);
    }

    fn on_subscribe(&self, client_id: &str, topic: &str) {
        self.inner.subscriptions.fetch_add(1, Ordering::AcqRel);
        tracing::debug!(client_id, topic, "Broker client subscribed");
        self.push_notice(BrokerNotice::Subscribed {
            client_id: client_id.to_string(),
            topic: topic.to_string(),
        });
        self.inner.callbacks.dispatch_subscribed(client_id, topic);
    }

    fn on_unsubscribe(&self, client_id: &str, topic: &str) {
        saturating_decrement(&self.inner.subscriptions);
        tracing::debug!(client_id, topic, "Broker client unsubscribed");
        self.push_notice(BrokerNotice::Unsubscribed {
            client_id: client_id.to_string(),
            topic: topic.to_string(),
        });
        self.inner.callbacks.dispatch_unsubscribed(client_id, topic);
    }

    fn on_message(&self, topic: &str) {
        self.inner.messages.fetch_add(1, Ordering::AcqRel);
        tracing::trace!(topic, "Broker message");
        self.inner.callbacks.dispatch_message(topic);
    }
}

impl fmt::Debug for ActivityTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityTracker")
            .field("activity", &self.activity())
            .field("pending_notices", &self.inner.notices.lock().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_follow_events() {
        let tracker = ActivityTracker::new();
        assert!(!tracker.activity().any());

        tracker.on_connected("a");
        tracker.on_connected("b");
        tracker.on_subscribe("a", "x/#");
        tracker.on_message("x/1");
        tracker.on_disconnected("b");

        assert_eq!(
            tracker.activity(),
            BrokerActivity {
                connections: 1,
                subscriptions: 1,
                messages: 1,
            }
        );
    }

    #[test]
    fn counters_never_go_negative() {
        let tracker = ActivityTracker::new();
        tracker.on_disconnected("ghost");
        tracker.on_unsubscribe("ghost", "t");
        assert_eq!(tracker.activity(), BrokerActivity::default());
    }

    #[test]
    fn messages_alone_count_as_activity() {
        let tracker = ActivityTracker::new();
        tracker.on_message("t");
        assert!(tracker.activity().any());
        assert!(tracker.drain_notices().is_empty());
    }

    #[test]
    fn notices_render_as_log_lines() {
        let tracker = ActivityTracker::new();
        tracker.on_connected("phone");
        tracker.on_subscribe("phone", "sensors/#");
        tracker.on_unsubscribe("phone", "sensors/#");
        tracker.on_disconnected("phone");

        let lines: Vec<String> = tracker
            .drain_notices()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            lines,
            vec![
                "client phone connected",
                "client phone subscribed sensors/#",
                "client phone unsubscribed sensors/#",
                "client phone disconnected",
            ]
        );
        assert!(tracker.drain_notices().is_empty());
    }

    #[test]
    fn notice_queue_is_bounded() {
        let tracker = ActivityTracker::new();
        for i in 0..NOTICE_CAPACITY + 3 {
            tracker.on_connected(&format!("c{i}"));
        }
        let notices = tracker.drain_notices();
        assert_eq!(notices.len(), NOTICE_CAPACITY);
        assert_eq!(
            notices[0],
            BrokerNotice::Connected {
                client_id: "c3".to_string()
            }
        );
    }

    #[test]
    fn clones_share_state_and_callbacks_fire() {
        let tracker = ActivityTracker::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        tracker.callbacks().on_client_connected(move |client| {
            s.lock().push(client.to_string());
        });

        let observer: Arc<dyn BrokerObserver> = Arc::new(tracker.clone());
        observer.on_connected("remote");

        assert_eq!(tracker.activity().connections, 1);
        assert_eq!(*seen.lock(), vec!["remote".to_string()]);
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Settling pause after a decode attempt.
//!
//! Instead of sleeping inside the tick, the provisioner records a deadline
//! and skips ticks until it has passed.

use std::time::Duration;

use tokio::time::Instant;

/// A "resume at" deadline that successive pauses extend.
#[derive(Debug, Clone, Default)]
pub struct SettleTimer {
    resume_at: Option<Instant>,
    arms: u64,
}

impl SettleTimer {
    /// Creates an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pause of `duration`, starting at `now` or at the end of the
    /// pause already pending, whichever is later.
    pub fn arm(&mut self, now: Instant, duration: Duration) {
        let start = self.resume_at.map_or(now, |at| at.max(now));
        self.resume_at = Some(start + duration);
        self.arms += 1;
    }

    /// Returns `true` while the pause has not elapsed.
    #[must_use]
    pub fn is_pending(&self, now: Instant) -> bool {
        self.resume_at.is_some_and(|at| now < at)
    }

    /// Time left until ticks resume, zero when idle.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.resume_at
            .map_or(Duration::ZERO, |at| at.saturating_duration_since(now))
    }

    /// How many pauses were armed in total.
    #[must_use]
    pub fn arms(&self) -> u64 {
        self.arms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_timer_is_not_pending() {
        let timer = SettleTimer::new();
        let now = Instant::now();
        assert!(!timer.is_pending(now));
        assert_eq!(timer.remaining(now), Duration::ZERO);
        assert_eq!(timer.arms(), 0);
    }

    #[test]
    fn pending_until_deadline() {
        let mut timer = SettleTimer::new();
        let t0 = Instant::now();
        timer.arm(t0, Duration::from_millis(500));

        assert!(timer.is_pending(t0));
        assert!(timer.is_pending(t0 + Duration::from_millis(499)));
        assert!(!timer.is_pending(t0 + Duration::from_millis(500)));
        assert_eq!(
            timer.remaining(t0 + Duration::from_millis(200)),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn pauses_in_one_tick_accumulate() {
        let mut timer = SettleTimer::new();
        let t0 = Instant::now();
        timer.arm(t0, Duration::from_millis(500));
        timer.arm(t0, Duration::from_secs(3));

        assert!(timer.is_pending(t0 + Duration::from_millis(3499)));
        assert!(!timer.is_pending(t0 + Duration::from_millis(3500)));
        assert_eq!(timer.arms(), 2);
    }

    #[test]
    fn expired_pause_does_not_carry_over() {
        let mut timer = SettleTimer::new();
        let t0 = Instant::now();
        timer.arm(t0, Duration::from_millis(500));

        let later = t0 + Duration::from_secs(10);
        timer.arm(later, Duration::from_millis(500));
        assert!(!timer.is_pending(later + Duration::from_millis(500)));
    }
}

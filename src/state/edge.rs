// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge-triggered change detection.

/// Remembers the last observed value and reports only changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeDetector<T> {
    last: Option<T>,
}

impl<T: Copy + PartialEq> EdgeDetector<T> {
    /// Creates a detector with no previous value; the first observation is a change.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Creates a detector that treats `initial` as already observed.
    #[must_use]
    pub const fn with_initial(initial: T) -> Self {
        Self {
            last: Some(initial),
        }
    }

    /// Records `value`, returning it if it differs from the previous one.
    pub fn observe(&mut self, value: T) -> Option<T> {
        if self.last == Some(value) {
            return None;
        }
        self.last = Some(value);
        Some(value)
    }

    /// The last observed value, if any.
    #[must_use]
    pub fn last(&self) -> Option<T> {
        self.last
    }
}

impl<T: Copy + PartialEq> Default for EdgeDetector<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_fires_on_first_observation() {
        let mut edges = EdgeDetector::new();
        assert_eq!(edges.last(), None);
        assert_eq!(edges.observe(0u8), Some(0));
        assert_eq!(edges.last(), Some(0));
    }

    #[test]
    fn initial_value_suppresses_first_repeat() {
        let mut edges = EdgeDetector::with_initial('a');
        assert_eq!(edges.observe('a'), None);
        assert_eq!(edges.observe('b'), Some('b'));
    }

    #[test]
    fn fires_once_per_change() {
        let mut edges = EdgeDetector::new();
        let fired: Vec<u8> = [1, 1, 2, 2, 2, 1, 3, 3]
            .into_iter()
            .filter_map(|v| edges.observe(v))
            .collect();
        assert_eq!(fired, vec![1, 2, 1, 3]);
    }
}

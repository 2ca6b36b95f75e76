// analysis_feed - A terminal viewer for multi-agent analysis streams
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Trailing debounce and leading throttle driven by an explicit clock.
//!
//! Both are plain values owned by whoever needs them and polled from the
//! frame tick; dropping the owner drops any pending deadline.

use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
pub const MIN_DEBOUNCE: Duration = Duration::from_millis(300);
pub const MAX_DEBOUNCE: Duration = Duration::from_millis(1500);

/// Collapses a burst of calls into one trailing invocation.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// Record a call at `now`, pushing the trailing deadline out.
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Whether a trailing invocation is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once per burst, when the deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

/// Allows at most one invocation per `interval`.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl Throttle {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_fired: None }
    }

    /// Fires immediately the first time, then once per elapsed interval.
    pub fn try_fire(&mut self, now: Instant) -> bool {
        let ready = self
            .last_fired
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if ready {
            self.last_fired = Some(now);
        }
        ready
    }

    /// Forget the last firing so the next `try_fire` succeeds.
    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}

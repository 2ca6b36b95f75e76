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

//! Pinned/detached auto-scroll state machine.
//!
//! While pinned the viewport follows new messages. Scrolling away from the
//! bottom detaches it; new messages then accumulate as an unseen count until
//! the user scrolls back down or jumps to the latest message.

/// Distance from the bottom, in scroll units, still treated as "at bottom".
pub const BOTTOM_TOLERANCE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    Pinned,
    Detached,
}

/// Measured geometry of the scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMetrics {
    pub scroll_height: usize,
    pub client_height: usize,
    pub scroll_top: usize,
}

impl ScrollMetrics {
    #[must_use]
    pub fn distance_from_bottom(&self) -> usize {
        self.scroll_height.saturating_sub(self.client_height).saturating_sub(self.scroll_top)
    }

    #[must_use]
    pub fn max_scroll(&self) -> usize {
        self.scroll_height.saturating_sub(self.client_height)
    }
}

#[derive(Debug, Clone)]
pub struct AutoScroll {
    mode: ScrollMode,
    tolerance: usize,
    /// Scroll offset requested by user input or by following.
    target: usize,
    /// Smoothed (fractional) position for animation.
    pos: f32,
    unseen: usize,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoScroll {
    #[must_use]
    pub fn new() -> Self {
        Self::with_tolerance(BOTTOM_TOLERANCE)
    }

    #[must_use]
    pub fn with_tolerance(tolerance: usize) -> Self {
        Self { mode: ScrollMode::Pinned, tolerance, target: 0, pos: 0.0, unseen: 0 }
    }

    #[must_use]
    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.mode == ScrollMode::Pinned
    }

    /// Messages that arrived while detached.
    #[must_use]
    pub fn unseen(&self) -> usize {
        self.unseen
    }

    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Current rendered offset, rounded from the smoothed position.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn offset(&self) -> usize {
        self.pos.max(0.0).round() as usize
    }

    /// Re-evaluate pinned/detached from the container geometry.
    pub fn observe(&mut self, metrics: ScrollMetrics) -> ScrollMode {
        let at_bottom = metrics.distance_from_bottom() <= self.tolerance;
        match (self.mode, at_bottom) {
            (ScrollMode::Pinned, false) => {
                tracing::debug!(distance = metrics.distance_from_bottom(), "auto-scroll detached");
                self.mode = ScrollMode::Detached;
            }
            (ScrollMode::Detached, true) => {
                tracing::debug!("auto-scroll re-pinned");
                self.pin();
            }
            _ => {}
        }
        self.mode
    }

    /// User-initiated scroll by `delta` units (negative is up).
    pub fn scroll_by(&mut self, delta: isize, max_scroll: usize) -> ScrollMode {
        self.target = self.target.saturating_add_signed(delta).min(max_scroll);
        self.observe(ScrollMetrics {
            scroll_height: max_scroll,
            client_height: 0,
            scroll_top: self.target,
        })
    }

    /// New messages were appended; `max_scroll` is the new bottom.
    pub fn on_new_messages(&mut self, count: usize, max_scroll: usize) {
        if count == 0 {
            return;
        }
        match self.mode {
            ScrollMode::Pinned => self.target = max_scroll,
            ScrollMode::Detached => self.unseen += count,
        }
    }

    pub fn jump_to_latest(&mut self, max_scroll: usize) {
        self.pin();
        self.target = max_scroll;
    }

    /// Keep the target inside the content after a resize or filter change.
    /// Following viewports snap to the new bottom.
    pub fn clamp(&mut self, max_scroll: usize) {
        if self.is_pinned() {
            self.target = max_scroll;
        } else {
            self.target = self.target.min(max_scroll);
        }
        self.pos = self.pos.min(max_scroll as f32);
    }

    /// Advance the smoothed position one frame toward the target.
    #[allow(clippy::cast_precision_loss)]
    pub fn tick(&mut self) {
        let target = self.target as f32;
        let delta = target - self.pos;
        if delta.abs() < 0.01 {
            self.pos = target;
        } else {
            // Smooth over ~2-3 frames at 30fps.
            self.pos += delta * 0.5;
        }
    }

    /// Jump the rendered position straight to the target.
    #[allow(clippy::cast_precision_loss)]
    pub fn settle(&mut self) {
        self.pos = self.target as f32;
    }

    fn pin(&mut self) {
        self.mode = ScrollMode::Pinned;
        self.unseen = 0;
    }
}

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

//! Fixed-height list virtualization.
//!
//! Every row is assumed to be `item_height` units tall. Content with
//! variable row heights needs a measured position cache instead.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportInput {
    pub scroll_top: usize,
    pub item_height: usize,
    pub container_height: usize,
    pub item_count: usize,
    pub overscan: usize,
}

/// Inclusive index range to render, plus the full content height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
    pub total_height: usize,
}

impl VisibleRange {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.end - self.start + 1
    }

    /// Offset of `start` from the top of the content.
    #[must_use]
    pub fn offset_of_start(&self, item_height: usize) -> usize {
        self.start * item_height
    }
}

/// Rows to render for the given scroll position. `None` when there is
/// nothing to render.
#[must_use]
pub fn visible_range(input: ViewportInput) -> Option<VisibleRange> {
    if input.item_count == 0 || input.item_height == 0 {
        return None;
    }
    let last = input.item_count - 1;
    let core_start = input.scroll_top / input.item_height;
    let core_end = (input.scroll_top + input.container_height)
        .div_ceil(input.item_height)
        .saturating_sub(1)
        .max(core_start);

    Some(VisibleRange {
        start: core_start.saturating_sub(input.overscan).min(last),
        end: core_end.saturating_add(input.overscan).min(last),
        total_height: input.item_count * input.item_height,
    })
}

#[must_use]
pub fn max_scroll(total_height: usize, container_height: usize) -> usize {
    total_height.saturating_sub(container_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn input(scroll_top: usize) -> ViewportInput {
        ViewportInput {
            scroll_top,
            item_height: 50,
            container_height: 500,
            item_count: 100,
            overscan: 5,
        }
    }

    #[test]
    fn middle_of_list_expands_by_overscan() {
        let range = visible_range(input(1000)).unwrap();
        assert_eq!((range.start, range.end), (15, 34));
        assert_eq!(range.total_height, 5000);
        assert_eq!(range.row_count(), 20);
    }

    #[test]
    fn top_of_list_clamps_to_zero() {
        let range = visible_range(input(0)).unwrap();
        assert_eq!((range.start, range.end), (0, 14));
    }

    #[test]
    fn bottom_of_list_clamps_to_last_index() {
        let range = visible_range(input(4500)).unwrap();
        assert_eq!((range.start, range.end), (85, 99));
    }

    #[test]
    fn scroll_past_end_still_clamps() {
        let range = visible_range(input(100_000)).unwrap();
        assert_eq!(range.end, 99);
        assert!(range.start <= range.end);
    }

    #[test]
    fn partial_row_is_included() {
        let range = visible_range(ViewportInput { overscan: 0, ..input(1010) }).unwrap();
        assert_eq!((range.start, range.end), (20, 30));
    }

    #[test]
    fn empty_or_degenerate_inputs_render_nothing() {
        assert_eq!(visible_range(ViewportInput { item_count: 0, ..input(0) }), None);
        assert_eq!(visible_range(ViewportInput { item_height: 0, ..input(0) }), None);
    }

    #[test]
    fn zero_height_container_renders_one_row() {
        let range =
            visible_range(ViewportInput { container_height: 0, overscan: 0, ..input(100) }).unwrap();
        assert_eq!((range.start, range.end), (2, 2));
    }

    #[test]
    fn max_scroll_saturates() {
        assert_eq!(max_scroll(5000, 500), 4500);
        assert_eq!(max_scroll(300, 500), 0);
    }
}

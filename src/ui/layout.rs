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

use ratatui::layout::{Constraint, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub header_sep: Rect,
    /// Error banner (zero-height when there is nothing to report).
    pub banner: Rect,
    pub body: Rect,
    pub footer_sep: Rect,
    pub footer: Option<Rect>,
}

pub fn compute(area: Rect, show_banner: bool) -> AppLayout {
    let banner_height = u16::from(show_banner);
    let zero = Rect::new(area.x, area.y, area.width, 0);

    if area.height < 6 {
        // Ultra-compact: body only, banner still wins a row when present
        let [banner, body] =
            Layout::vertical([Constraint::Length(banner_height), Constraint::Min(1)]).areas(area);
        AppLayout { header: zero, header_sep: zero, banner, body, footer_sep: zero, footer: None }
    } else {
        let [header, header_sep, banner, body, footer_sep, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(banner_height),
            Constraint::Min(2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        AppLayout { header, header_sep, banner, body, footer_sep, footer: Some(footer) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn area(w: u16, h: u16) -> Rect {
        Rect::new(0, 0, w, h)
    }

    fn total_height(layout: &AppLayout) -> u16 {
        layout.header.height
            + layout.header_sep.height
            + layout.banner.height
            + layout.body.height
            + layout.footer_sep.height
            + layout.footer.map_or(0, |f| f.height)
    }

    #[test]
    fn normal_layout_fills_area() {
        let layout = compute(area(80, 24), false);
        assert_eq!(total_height(&layout), 24);
        assert_eq!(layout.body.height, 20);
        assert_eq!(layout.banner.height, 0);
        assert!(layout.footer.is_some());
    }

    #[test]
    fn banner_takes_one_row_from_body() {
        let layout = compute(area(80, 24), true);
        assert_eq!(layout.banner.height, 1);
        assert_eq!(layout.body.height, 19);
        assert_eq!(layout.body.y, layout.banner.y + 1);
    }

    #[test]
    fn compact_layout_drops_chrome() {
        let layout = compute(area(40, 4), false);
        assert_eq!(layout.header.height, 0);
        assert!(layout.footer.is_none());
        assert_eq!(layout.body.height, 4);
    }
}

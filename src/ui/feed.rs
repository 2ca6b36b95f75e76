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

use crate::app::{App, ROW_HEIGHT};
use crate::feed::viewport::{ViewportInput, visible_range};
use crate::ui::{message, theme};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;

#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let viewport_rows = usize::from(area.height);
    if app.viewport_rows != viewport_rows {
        app.viewport_rows = viewport_rows;
        let max_scroll = app.max_scroll();
        app.scroll.clamp(max_scroll);
    }

    let Some(range) = visible_range(ViewportInput {
        scroll_top: app.scroll.offset(),
        item_height: ROW_HEIGHT,
        container_height: viewport_rows,
        item_count: app.view.len(),
        overscan: app.config.overscan,
    }) else {
        render_empty(frame, area, app);
        return;
    };

    let content_height = range.total_height;
    let mut lines: Vec<Line<'static>> = Vec::with_capacity(range.row_count() * ROW_HEIGHT);
    for msg in &app.view[range.start..=range.end] {
        let reveal = app
            .typewriter
            .as_ref()
            .filter(|(id, _)| *id == msg.id)
            .map(|(_, tw)| tw.visible());
        lines.extend(message::render_message(msg, area.width, reveal));
    }

    if content_height <= viewport_rows {
        // Short content: bottom-aligned so the newest row sits at the bottom
        let offset = (viewport_rows - content_height) as u16;
        let render_area = Rect {
            x: area.x,
            y: area.y + offset,
            width: area.width,
            height: content_height as u16,
        };
        frame.render_widget(Paragraph::new(Text::from(lines)), render_area);
    } else {
        // Only rows start..=end were built; scroll relative to the first
        let within = app.scroll.offset().saturating_sub(range.offset_of_start(ROW_HEIGHT));
        frame.render_widget(Paragraph::new(Text::from(lines)).scroll((within as u16, 0)), area);
    }
}

fn render_empty(frame: &mut Frame, area: Rect, app: &App) {
    let text = if !app.filter.is_empty() {
        "No messages match the current filters (Esc clears)"
    } else if app.history.is_loading() {
        "Loading history…"
    } else {
        "Waiting for analysis messages…"
    };
    let line = Line::from(Span::styled(format!("  {text}"), Style::default().fg(theme::DIM)));
    let y = area.y + area.height.saturating_sub(1);
    frame.render_widget(Paragraph::new(line), Rect { y, height: area.height.min(1), ..area });
}

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

use crate::app::App;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const HEADER_PAD: u16 = 2;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + HEADER_PAD,
        y: area.y,
        width: area.width.saturating_sub(HEADER_PAD * 2),
        height: area.height,
    };

    let sep = || Span::styled("  \u{2502}  ", Style::default().fg(theme::DIM));

    let mut spans = vec![
        Span::styled(
            "analysis-feed",
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled("Session: ", Style::default().fg(theme::DIM)),
        Span::styled(app.session_id().to_owned(), Style::default().fg(Color::White)),
        sep(),
        Span::styled("Source: ", Style::default().fg(theme::DIM)),
        Span::styled(
            if app.include_historical { "live + history" } else { "live" },
            Style::default().fg(Color::White),
        ),
    ];

    if app.include_historical {
        spans.push(sep());
        spans.push(Span::styled(
            format!("{}/{} loaded", app.history.len(), app.history.total()),
            Style::default().fg(theme::DIM),
        ));
        if app.history.is_loading() {
            spans.push(Span::styled("  loading…", Style::default().fg(theme::LOADING)));
        } else if app.history.has_next() {
            spans.push(Span::styled("  m: more", Style::default().fg(theme::DIM)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), padded);
}

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

mod feed;
mod header;
mod layout;
mod message;
pub mod theme;

use crate::app::{App, InputMode};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &mut App) {
    let frame_area = frame.area();
    let banner = app.error_banner().map(str::to_owned);
    let areas = layout::compute(frame_area, banner.is_some());

    if areas.header.height > 0 {
        header::render(frame, areas.header, app);
        render_separator(frame, areas.header_sep);
    }

    if let Some(text) = banner.as_deref() {
        render_banner(frame, areas.banner, text);
    }

    feed::render(frame, areas.body, app);

    if let Some(footer_area) = areas.footer {
        render_separator(frame, areas.footer_sep);
        render_footer(frame, footer_area, app);
    }
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let sep = theme::SEPARATOR_CHAR.repeat(usize::from(area.width));
    frame.render_widget(Paragraph::new(Span::styled(sep, Style::default().fg(theme::DIM))), area);
}

fn render_banner(frame: &mut Frame, area: Rect, text: &str) {
    let line = Line::from(vec![
        Span::styled(
            format!("  ✗ {text}"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   r: retry  x: dismiss", Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::BANNER_ERROR_BG)),
        area,
    );
}

const FOOTER_PAD: u16 = 2;

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + FOOTER_PAD,
        y: area.y,
        width: area.width.saturating_sub(FOOTER_PAD * 2),
        height: area.height,
    };
    frame.render_widget(Paragraph::new(footer_line(app)), padded);
}

fn footer_line(app: &App) -> Line<'static> {
    if app.input_mode == InputMode::Search {
        return Line::from(vec![
            Span::styled(theme::SEARCH_PROMPT, Style::default().fg(theme::ACCENT)),
            Span::raw(app.search_input.clone()),
            Span::styled("▏", Style::default().fg(theme::ACCENT)),
            Span::styled("   Enter: apply  Esc: clear", Style::default().fg(theme::DIM)),
        ]);
    }

    let mut spans = Vec::new();
    if app.scroll.unseen() > 0 {
        spans.push(Span::styled(
            format!("↓ {} new  G: jump to latest", app.scroll.unseen()),
            Style::default().fg(theme::NEW_MESSAGES).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("   "));
    } else if !app.scroll.is_pinned() {
        spans.push(Span::styled("G: jump to latest", Style::default().fg(theme::NEW_MESSAGES)));
        spans.push(Span::raw("   "));
    }

    let filters = filter_summary(app);
    if !filters.is_empty() {
        spans.push(Span::styled(filters, Style::default().fg(Color::White)));
        spans.push(Span::raw("   "));
    }

    spans.push(Span::styled(
        format!("{} shown", app.view.len()),
        Style::default().fg(theme::DIM),
    ));
    spans.push(Span::styled(
        "   t:type a:agent /:search h:history r:refresh q:quit",
        Style::default().fg(theme::DIM),
    ));
    Line::from(spans)
}

fn filter_summary(app: &App) -> String {
    let mut parts = Vec::new();
    if let Some(kind) = app.filter.message_type {
        parts.push(format!("type={kind}"));
    }
    if let Some(agent) = app.filter.agent_name.as_deref() {
        parts.push(format!("agent={agent}"));
    }
    if let Some(term) = app.filter.search_term.as_deref() {
        parts.push(format!("search=\"{term}\""));
    }
    parts.join(" ")
}

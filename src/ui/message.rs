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

use crate::feed::Message;
use crate::feed::present::truncate_for_display;
use crate::ui::theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

const CONTENT_INDENT: &str = "    ";

/// Two lines per message: `icon label agent [tool]  #seq time`, then the
/// body truncated to the available width. `body_override` replaces the
/// content (used for the typewriter reveal).
pub fn render_message(msg: &Message, width: u16, body_override: Option<&str>) -> [Line<'static>; 2] {
    let presentation = msg.message_type.presentation();
    let color = theme::tone_color(presentation.tone);
    let width = usize::from(width);

    let mut header = vec![
        Span::styled(format!("  {} ", presentation.icon), Style::default().fg(color)),
        Span::styled(
            presentation.label.to_owned(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(msg.agent_label().to_owned(), Style::default().fg(theme::ACCENT)),
    ];
    if let Some(tool) = msg.tool_name.as_deref() {
        header.push(Span::styled(format!("  {tool}"), Style::default().fg(theme::TONE_TOOL)));
    }
    let meta = format!("  #{} {}", msg.sequence_number, msg.created_at.format("%H:%M:%S"));
    let used: usize = header.iter().map(|s| s.content.width()).sum();
    if used + meta.width() <= width {
        header.push(Span::styled(meta, Style::default().fg(theme::DIM)));
    }

    let body_source = match body_override {
        Some(partial) => partial.to_owned(),
        None if msg.content.is_empty() => tool_args_preview(msg).unwrap_or_default(),
        None => msg.content.clone(),
    };
    let body = truncate_for_display(&body_source, width.saturating_sub(CONTENT_INDENT.len()));

    [
        Line::from(header),
        Line::from(vec![Span::raw(CONTENT_INDENT), Span::raw(body)]),
    ]
}

fn tool_args_preview(msg: &Message) -> Option<String> {
    msg.tool_args.as_ref().map(serde_json::Value::to_string)
}

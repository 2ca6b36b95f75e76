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

use crate::feed::present::Tone;
use ratatui::style::Color;

// Accent
pub const ACCENT: Color = Color::Rgb(244, 118, 0);

// UI chrome
pub const DIM: Color = Color::DarkGray;
pub const SEPARATOR_CHAR: &str = "─";
pub const SEARCH_PROMPT: &str = "/";

// Message tones (muted, errors stand out)
pub const TONE_NEUTRAL: Color = Color::Gray;
pub const TONE_THINKING: Color = Color::Magenta;
pub const TONE_TOOL: Color = Color::Cyan;
pub const TONE_DANGER: Color = Color::Red;
pub const TONE_INSIGHT: Color = ACCENT;

// Banners and affordances
pub const BANNER_ERROR_BG: Color = Color::Rgb(90, 20, 20);
pub const NEW_MESSAGES: Color = Color::Yellow;
pub const LOADING: Color = Color::Cyan;

/// Map a message tone to its colour.
#[must_use]
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Neutral => TONE_NEUTRAL,
        Tone::Thinking => TONE_THINKING,
        Tone::Tool => TONE_TOOL,
        Tone::Danger => TONE_DANGER,
        Tone::Insight => TONE_INSIGHT,
    }
}

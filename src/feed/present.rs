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

use super::model::MessageType;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Semantic colour slot; the terminal theme maps it to a concrete colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Thinking,
    Tool,
    Danger,
    Insight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub icon: &'static str,
    pub label: &'static str,
    pub tone: Tone,
}

const SYSTEM: Presentation = Presentation { icon: "⚙", label: "System", tone: Tone::Neutral };

impl MessageType {
    #[must_use]
    pub fn presentation(self) -> Presentation {
        match self {
            Self::System | Self::Unknown => SYSTEM,
            Self::Reasoning => Presentation { icon: "❖", label: "Reasoning", tone: Tone::Thinking },
            Self::ToolCall => Presentation { icon: "⟩", label: "Tool", tone: Tone::Tool },
            Self::Error => Presentation { icon: "✗", label: "Error", tone: Tone::Danger },
            Self::Analysis => Presentation { icon: "◆", label: "Analysis", tone: Tone::Insight },
        }
    }
}

/// Fit `text` on one line of `max_cols` display columns, collapsing
/// newlines and appending an ellipsis when cut.
#[must_use]
pub fn truncate_for_display(text: &str, max_cols: usize) -> String {
    let flat: String =
        text.chars().map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c }).collect();
    if flat.width() <= max_cols {
        return flat;
    }
    if max_cols == 0 {
        return String::new();
    }
    let budget = max_cols - 1;
    let mut out = String::new();
    let mut used = 0usize;
    for ch in flat.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Progressive reveal of a message body, a few characters per frame.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    revealed_chars: usize,
    total_chars: usize,
    chars_per_tick: usize,
}

impl Typewriter {
    pub const DEFAULT_CHARS_PER_TICK: usize = 4;

    #[must_use]
    pub fn new(text: impl Into<String>, chars_per_tick: usize) -> Self {
        let text = text.into();
        let total_chars = text.chars().count();
        Self { text, revealed_chars: 0, total_chars, chars_per_tick: chars_per_tick.max(1) }
    }

    pub fn tick(&mut self) {
        self.revealed_chars = (self.revealed_chars + self.chars_per_tick).min(self.total_chars);
    }

    pub fn skip(&mut self) {
        self.revealed_chars = self.total_chars;
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.revealed_chars >= self.total_chars
    }

    /// Revealed prefix, always cut on a char boundary.
    #[must_use]
    pub fn visible(&self) -> &str {
        let end = self.text.char_indices().nth(self.revealed_chars).map_or(self.text.len(), |(i, _)| i);
        &self.text[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_presents_as_system() {
        assert_eq!(MessageType::Unknown.presentation(), MessageType::System.presentation());
    }

    #[test]
    fn every_type_has_a_label() {
        for kind in MessageType::FILTERABLE {
            assert!(!kind.presentation().label.is_empty());
        }
        assert_eq!(MessageType::Error.presentation().tone, Tone::Danger);
    }

    #[test]
    fn truncate_keeps_short_text_and_flattens_newlines() {
        assert_eq!(truncate_for_display("a\nb", 10), "a b");
    }

    #[test]
    fn truncate_adds_ellipsis_within_budget() {
        let out = truncate_for_display("abcdefghij", 5);
        assert_eq!(out, "abcd…");
        assert_eq!(out.width(), 5);
    }

    #[test]
    fn truncate_respects_wide_chars() {
        let out = truncate_for_display("株価株価株価", 6);
        assert_eq!(out, "株価…");
        assert!(out.width() <= 6);
    }

    #[test]
    fn truncate_zero_width_is_empty() {
        assert_eq!(truncate_for_display("abc", 0), "");
    }

    #[test]
    fn typewriter_reveals_progressively() {
        let mut tw = Typewriter::new("héllo wörld", 3);
        assert_eq!(tw.visible(), "");
        tw.tick();
        assert_eq!(tw.visible(), "hél");
        tw.tick();
        assert_eq!(tw.visible(), "héllo ");
        tw.skip();
        assert!(tw.is_done());
        assert_eq!(tw.visible(), "héllo wörld");
    }

    #[test]
    fn typewriter_stops_at_end() {
        let mut tw = Typewriter::new("ab", 10);
        tw.tick();
        tw.tick();
        assert_eq!(tw.visible(), "ab");
        assert!(tw.is_done());
    }
}

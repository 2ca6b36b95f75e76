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

use super::model::{Message, MessageType};

/// Predicates applied over the reconciled sequence. Unset or blank fields
/// impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFilter {
    pub message_type: Option<MessageType>,
    pub agent_name: Option<String>,
    pub search_term: Option<String>,
}

impl MessageFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.message_type.is_none()
            && non_blank(self.agent_name.as_deref()).is_none()
            && non_blank(self.search_term.as_deref()).is_none()
    }

    #[must_use]
    pub fn matches(&self, msg: &Message) -> bool {
        if let Some(kind) = self.message_type
            && msg.message_type != kind
        {
            return false;
        }
        if let Some(agent) = non_blank(self.agent_name.as_deref())
            && msg.agent_name.as_deref() != Some(agent)
        {
            return false;
        }
        if let Some(term) = non_blank(self.search_term.as_deref()) {
            return contains_term(msg, &term.to_lowercase());
        }
        true
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn contains_term(msg: &Message, needle_lower: &str) -> bool {
    let haystacks = [Some(msg.content.as_str()), msg.agent_name.as_deref(), msg.tool_name.as_deref()];
    haystacks.into_iter().flatten().any(|text| text.to_lowercase().contains(needle_lower))
}

/// Subsequence of `messages` that satisfies every predicate in `filter`.
#[must_use]
pub fn apply_filter(messages: &[Message], filter: &MessageFilter) -> Vec<Message> {
    if filter.is_empty() {
        return messages.to_vec();
    }
    messages.iter().filter(|m| filter.matches(m)).cloned().collect()
}

/// Distinct agent names in first-seen-independent, sorted order.
#[must_use]
pub fn distinct_agents(messages: &[Message]) -> Vec<String> {
    let mut agents: Vec<String> = messages
        .iter()
        .filter_map(|m| non_blank(m.agent_name.as_deref()))
        .map(str::to_owned)
        .collect();
    agents.sort_unstable();
    agents.dedup();
    agents
}

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

//! Client-side state for the analysis message stream: reconciliation of live
//! and historical messages, filtering, scrolling and virtualization, plus the
//! small derived-state helpers used by the portfolio and sentiment panels.

pub mod autoscroll;
pub mod filter;
pub mod history;
pub mod model;
pub mod overlay;
pub mod portfolio;
pub mod present;
pub mod reconcile;
pub mod timing;
pub mod viewport;

pub use autoscroll::{AutoScroll, ScrollMetrics, ScrollMode};
pub use filter::{MessageFilter, apply_filter};
pub use history::{ApplyOutcome, HistoryBuffer, HistoryPage, HistoryQuery, HistoryTicket};
pub use model::{Message, MessageType};
pub use reconcile::{MergeCache, merge_messages};
pub use viewport::{ViewportInput, VisibleRange, visible_range};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::model::{Message, MessageType};
    use chrono::{DateTime, Duration, TimeZone as _, Utc};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).single().unwrap_or_default()
    }

    /// Analysis message whose timestamp tracks its sequence number.
    pub(crate) fn msg(id: &str, seq: u64) -> Message {
        Message {
            id: id.to_owned(),
            sequence_number: seq,
            created_at: base_time() + Duration::seconds(i64::try_from(seq).unwrap_or(0)),
            message_type: MessageType::Analysis,
            agent_name: None,
            content: format!("message {id}"),
            tool_name: None,
            tool_args: None,
        }
    }

    impl Message {
        pub(crate) fn with_content(mut self, content: &str) -> Self {
            self.content = content.to_owned();
            self
        }

        pub(crate) fn with_type(mut self, kind: MessageType) -> Self {
            self.message_type = kind;
            self
        }

        pub(crate) fn with_agent(mut self, agent: &str) -> Self {
            self.agent_name = Some(agent.to_owned());
            self
        }

        pub(crate) fn with_tool(mut self, tool: &str) -> Self {
            self.tool_name = Some(tool.to_owned());
            self
        }

        pub(crate) fn at_offset_secs(mut self, secs: i64) -> Self {
            self.created_at = base_time() + Duration::seconds(secs);
            self
        }
    }
}
